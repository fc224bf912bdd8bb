//! Map configuration: canvas size, projection, marker radii, tooltip
//! timing and data locations.

use anyhow::Context;
use cwr_geo::projection::Mercator;
use serde::{Deserialize, Serialize};

/// Tooltip fade timing and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub fade_in_ms: u32,
    pub fade_out_ms: u32,
    /// Opacity the panel fades in to
    pub opacity: f64,
    /// Vertical offset from the pointer, in pixels (negative is up)
    pub offset_y: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            fade_in_ms: 200,
            fade_out_ms: 500,
            opacity: 0.9,
            offset_y: -30.0,
        }
    }
}

/// Everything the renderer and the interaction controller are tuned by.
///
/// `Default` gives the stock California map. A JSON document with any
/// subset of the fields can override it via [`MapConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: f64,
    pub height: f64,
    /// Projection center as (longitude, latitude) degrees
    pub center: (f64, f64),
    /// Projection scale in pixels per radian
    pub scale: f64,
    /// Radius of an idle marker
    pub base_radius: f64,
    /// Extra radius per unit of connection weight
    pub scale_factor: f64,
    /// Radius of the selected marker
    pub selected_radius: f64,
    /// Radius of reservoirs highlighted by a county hover
    pub county_highlight_radius: f64,
    pub tooltip: TooltipConfig,
    pub counties_url: String,
    pub reservoirs_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            center: (-118.734060, 37.786874),
            scale: Mercator::california_scale(),
            base_radius: 5.0,
            scale_factor: 30.0,
            selected_radius: 10.0,
            county_highlight_radius: 10.0,
            tooltip: TooltipConfig::default(),
            counties_url: "ca_counties.geojson".to_string(),
            reservoirs_url: "reservoir_data.json".to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid map configuration")
    }

    /// Projection placing `center` in the middle of the canvas.
    pub fn projection(&self) -> Mercator {
        Mercator::new(
            self.center,
            self.scale,
            (self.width / 2.0, self.height / 2.0),
        )
    }

    /// Radius of a marker highlighted through an edge of the given weight.
    pub fn weighted_radius(&self, weight: f64) -> f64 {
        self.base_radius + weight * self.scale_factor
    }
}
