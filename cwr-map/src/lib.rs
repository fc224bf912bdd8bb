//! Reservoir connection map core.
//!
//! This crate holds everything about the map that doesn't need a browser:
//! - `connections`: the weighted reservoir adjacency table and the county table
//! - `scene`: projected county shapes and reservoir markers, addressed by id
//! - `controller`: the hover/click state machine producing render commands
//! - `tooltip`: tooltip text and fade commands
//! - `svg`: a standalone SVG snapshot of the current map
//!
//! # Usage
//!
//! ```rust
//! use cwr_map::config::MapConfig;
//! use cwr_map::connections::Connections;
//! use cwr_map::controller::{InteractionController, InteractionEvent};
//! use cwr_geo::reservoir::ReservoirRecord;
//!
//! let mut controller = InteractionController::new(MapConfig::default(), Connections::embedded().unwrap());
//! let records = ReservoirRecord::parse_reservoir_json(
//!     r#"[{ "Name": "HTH", "LakeName": "Hetch Hetchy Reservoir", "Latitude": 37.946, "Longitude": -119.787 }]"#,
//! ).unwrap();
//! controller.draw_reservoirs(&records);
//! controller.dispatch(&InteractionEvent::ClickReservoir { id: "HTH".to_string() });
//! assert_eq!(controller.state().selection(), Some("HTH"));
//! ```

pub mod config;
pub mod connections;
pub mod controller;
pub mod scene;
pub mod style;
pub mod svg;
pub mod tooltip;
