//! The SVG map: county polygons underneath reservoir markers.

use crate::state::AppState;
use cwr_map::controller::InteractionEvent;
use cwr_map::scene::{CountyShape, ReservoirMarker};
use cwr_map::style::{COUNTY_FILL, COUNTY_OPACITY, COUNTY_STROKE, COUNTY_STROKE_WIDTH};
use dioxus::prelude::*;

/// Draws every published county and reservoir and forwards pointer events
/// to the interaction controller.
#[component]
pub fn MapCanvas() -> Element {
    let state = use_context::<AppState>();
    let view_box = {
        let config = state.config.read();
        format!("0 0 {} {}", config.width, config.height)
    };
    let counties: Vec<(String, CountyShape)> = state
        .counties
        .read()
        .iter()
        .enumerate()
        .map(|(i, shape)| (element_key(&shape.id, i), shape.clone()))
        .collect();
    let reservoirs: Vec<(String, ReservoirMarker)> = state
        .reservoirs
        .read()
        .iter()
        .enumerate()
        .map(|(i, marker)| (element_key(&marker.id, i), marker.clone()))
        .collect();

    rsx! {
        svg {
            view_box: "{view_box}",
            width: "100%",
            g {
                class: "counties",
                for (key, shape) in counties {
                    CountyPath { key: "{key}", shape }
                }
            }
            g {
                class: "reservoirs",
                for (key, marker) in reservoirs {
                    ReservoirCircle { key: "{key}", marker }
                }
            }
        }
    }
}

/// Sibling key for a drawn element. Ids may repeat across records, so the
/// draw position is part of the key.
fn element_key(id: &str, index: usize) -> String {
    format!("{}-{}", id, index)
}

#[derive(Props, Clone, PartialEq)]
struct CountyPathProps {
    shape: CountyShape,
}

#[component]
fn CountyPath(props: CountyPathProps) -> Element {
    let state = use_context::<AppState>();
    let name = props.shape.name.clone();

    rsx! {
        path {
            id: "{props.shape.id}",
            class: "zip",
            d: "{props.shape.path}",
            fill: COUNTY_FILL,
            stroke: COUNTY_STROKE,
            stroke_width: "{COUNTY_STROKE_WIDTH}",
            opacity: "{COUNTY_OPACITY}",
            onmouseenter: move |evt: MouseEvent| {
                let point = evt.page_coordinates();
                state.dispatch(InteractionEvent::HoverCounty {
                    name: name.clone(),
                    x: point.x,
                    y: point.y,
                });
            },
            onmouseleave: move |_| state.dispatch(InteractionEvent::HoverExit),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct ReservoirCircleProps {
    marker: ReservoirMarker,
}

#[component]
fn ReservoirCircle(props: ReservoirCircleProps) -> Element {
    let state = use_context::<AppState>();
    let style = state.marker_style(&props.marker.id);
    let class = style.class(props.marker.important);
    let hover_id = props.marker.id.clone();
    let click_id = props.marker.id.clone();

    rsx! {
        circle {
            id: "{props.marker.id}",
            class: "{class}",
            cx: "{props.marker.cx}",
            cy: "{props.marker.cy}",
            r: "{style.radius}",
            fill: style.fill(),
            stroke: style.stroke(),
            style: "cursor: pointer;",
            onmouseenter: move |evt: MouseEvent| {
                let point = evt.page_coordinates();
                state.dispatch(InteractionEvent::HoverReservoir {
                    id: hover_id.clone(),
                    x: point.x,
                    y: point.y,
                });
            },
            onmouseleave: move |_| state.dispatch(InteractionEvent::HoverExit),
            onclick: move |_| {
                state.dispatch(InteractionEvent::ClickReservoir { id: click_id.clone() });
            },
        }
    }
}
