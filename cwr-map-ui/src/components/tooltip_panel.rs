//! Floating tooltip that follows the pointer over map elements.

use crate::state::AppState;
use dioxus::prelude::*;

/// Tooltip panel. Position, opacity and fade duration come from the last
/// tooltip command; CSS performs the fade.
#[component]
pub fn TooltipPanel() -> Element {
    let state = use_context::<AppState>();
    let view = state.tooltip.read().clone();
    let style = format!(
        "position: absolute; left: {}px; top: {}px; opacity: {}; transition: opacity {}ms; \
         pointer-events: none; padding: 4px 10px; border-radius: 8px; \
         color: white; background-color: rgba(0, 0, 0, 0.5); font-size: 13px;",
        view.left, view.top, view.opacity, view.fade_ms
    );

    rsx! {
        div {
            class: "tooltip",
            style: "{style}",
            if let Some(content) = view.content {
                p {
                    style: "margin: 4px 0;",
                    strong { "{content.title}" }
                }
                for line in content.lines {
                    p {
                        style: "margin: 2px 0;",
                        "{line}"
                    }
                }
            }
        }
    }
}
