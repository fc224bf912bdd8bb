//! Visual encoding of reservoir marker state.

use serde::Serialize;

/// Fill and stroke of an idle marker.
pub const BASE_COLOR: &str = "black";
/// Fill and stroke of highlighted and selected markers.
pub const ACCENT_COLOR: &str = "red";

/// County polygon styling.
pub const COUNTY_FILL: &str = "rgb(2, 88, 171)";
pub const COUNTY_STROKE: &str = "rgb(2, 70, 120)";
pub const COUNTY_STROKE_WIDTH: f64 = 2.0;
pub const COUNTY_OPACITY: f64 = 0.3;

/// Why a marker is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Highlight {
    /// Connected to the hovered or selected reservoir; radius encodes weight.
    Neighbor,
    /// Connected to the hovered county; flat radius.
    County,
}

/// Current look of one reservoir marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub highlight: Option<Highlight>,
    pub selected: bool,
    pub hovered: bool,
}

impl MarkerStyle {
    pub fn baseline(radius: f64) -> Self {
        Self {
            radius,
            highlight: None,
            selected: false,
            hovered: false,
        }
    }

    pub fn is_baseline(&self, base_radius: f64) -> bool {
        *self == Self::baseline(base_radius)
    }

    pub fn fill(&self) -> &'static str {
        if self.selected || self.highlight.is_some() {
            ACCENT_COLOR
        } else {
            BASE_COLOR
        }
    }

    pub fn stroke(&self) -> &'static str {
        if self.selected || self.hovered || self.highlight.is_some() {
            ACCENT_COLOR
        } else {
            BASE_COLOR
        }
    }

    /// Space separated class list, always starting with `res`.
    pub fn class(&self, important: bool) -> String {
        let mut class = String::from("res");
        if important {
            class.push_str(" important");
        }
        match self.highlight {
            Some(Highlight::Neighbor) => class.push_str(" highlighted"),
            Some(Highlight::County) => class.push_str(" highlighted county-link"),
            None => {}
        }
        if self.selected {
            class.push_str(" selected");
        }
        if self.hovered {
            class.push_str(" hovered");
        }
        class
    }
}
