//! Data loading indicator and load failure banner.

use crate::state::AppState;
use dioxus::prelude::*;

/// Shows "Loading map data..." while layers are being fetched, or the
/// failure message when a layer couldn't be loaded. Renders nothing once
/// the map is complete.
#[component]
pub fn LoadStatus() -> Element {
    let state = use_context::<AppState>();

    if let Some(message) = (state.error_msg)() {
        return rsx! {
            div {
                style: "padding: 12px 16px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-radius: 4px; border: 1px solid #EF9A9A;",
                strong { "Map incomplete: " }
                "{message}"
            }
        };
    }

    if (state.loading)() {
        let counties = state.counties.read().len();
        let progress = if counties == 0 {
            "Loading county boundaries...".to_string()
        } else {
            format!("Drew {} counties, loading reservoirs...", counties)
        };
        return rsx! {
            div {
                style: "display: flex; justify-content: center; align-items: center; padding: 16px; color: #666;",
                "{progress}"
            }
        };
    }

    rsx! {}
}
