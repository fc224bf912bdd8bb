//! Map title with a legend for the marker encoding.

use cwr_map::style::{ACCENT_COLOR, BASE_COLOR};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct MapHeaderProps {
    pub title: String,
    #[props(default = String::new())]
    pub subtitle: String,
}

#[component]
pub fn MapHeader(props: MapHeaderProps) -> Element {
    rsx! {
        header {
            style: "margin-bottom: 8px;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 16px;",
                "{props.title}"
            }
            if !props.subtitle.is_empty() {
                p {
                    style: "margin: 0 0 6px 0; font-size: 12px; color: #666;",
                    "{props.subtitle}"
                }
            }
            div {
                style: "display: flex; gap: 16px; font-size: 12px; color: #444;",
                LegendSwatch { color: BASE_COLOR, radius: 4.0, label: "Reservoir" }
                LegendSwatch { color: ACCENT_COLOR, radius: 7.0, label: "Connected (larger = stronger)" }
                LegendSwatch { color: ACCENT_COLOR, radius: 9.0, label: "Selected (click to pin)" }
            }
        }
    }
}

#[component]
fn LegendSwatch(color: &'static str, radius: f64, label: &'static str) -> Element {
    rsx! {
        span {
            style: "display: inline-flex; align-items: center; gap: 4px;",
            svg {
                width: "20",
                height: "20",
                view_box: "0 0 20 20",
                circle { cx: "10", cy: "10", r: "{radius}", fill: color, stroke: color }
            }
            "{label}"
        }
    }
}
