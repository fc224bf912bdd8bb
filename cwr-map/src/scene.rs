//! The drawn map: projected county shapes and reservoir markers, plus the
//! registry that addresses them by element identifier.
//!
//! Drawing happens in two phases, counties then reservoirs. A scene with
//! counties only is a valid (partially rendered) map.

use crate::config::MapConfig;
use crate::connections::Connections;
use cwr_geo::county::CountyFeature;
use cwr_geo::projection::Mercator;
use cwr_geo::reservoir::ReservoirRecord;
use log::{info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    County,
    Reservoir,
}

/// Where an element lives in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub index: usize,
}

/// Identifier -> element lookup owned by the scene.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    elements: HashMap<String, ElementRef>,
}

impl ElementRegistry {
    fn insert(&mut self, id: String, element: ElementRef) {
        if let Some(previous) = self.elements.insert(id.clone(), element) {
            warn!(
                "Element id {} is drawn more than once, replacing {:?} #{}",
                id, previous.kind, previous.index
            );
        }
    }

    pub fn get(&self, id: &str) -> Option<ElementRef> {
        self.elements.get(id).copied()
    }

    pub fn is_reservoir(&self, id: &str) -> bool {
        matches!(self.get(id), Some(e) if e.kind == ElementKind::Reservoir)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One county polygon, ready for an SVG `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyShape {
    pub id: String,
    pub name: String,
    /// SVG path data in screen coordinates
    pub path: String,
}

/// One reservoir circle.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirMarker {
    pub id: String,
    pub record: ReservoirRecord,
    pub cx: f64,
    pub cy: f64,
    /// Keys the adjacency table; a fixed style distinction
    pub important: bool,
}

#[derive(Debug, Clone)]
pub struct MapScene {
    projection: Mercator,
    width: f64,
    height: f64,
    counties: Vec<CountyShape>,
    reservoirs: Vec<ReservoirMarker>,
    registry: ElementRegistry,
}

impl MapScene {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            projection: config.projection(),
            width: config.width,
            height: config.height,
            counties: Vec::new(),
            reservoirs: Vec::new(),
            registry: ElementRegistry::default(),
        }
    }

    /// Draw one shape per county. Returns the number of shapes drawn.
    pub fn draw_counties(&mut self, features: &[CountyFeature]) -> usize {
        for feature in features {
            let id = feature.element_id();
            let index = self.counties.len();
            self.counties.push(CountyShape {
                id: id.clone(),
                name: feature.name.clone(),
                path: self.projection.path_data(&feature.boundary),
            });
            self.registry.insert(
                id,
                ElementRef {
                    kind: ElementKind::County,
                    index,
                },
            );
        }
        info!("Drew {} county shapes", features.len());
        features.len()
    }

    /// Draw one marker per reservoir record. Returns the number drawn.
    pub fn draw_reservoirs(&mut self, records: &[ReservoirRecord], connections: &Connections) -> usize {
        for record in records {
            let id = record.element_id();
            let (cx, cy) = self.projection.project(record.longitude, record.latitude);
            let index = self.reservoirs.len();
            self.reservoirs.push(ReservoirMarker {
                important: connections.is_important(&id),
                id: id.clone(),
                record: record.clone(),
                cx,
                cy,
            });
            self.registry.insert(
                id,
                ElementRef {
                    kind: ElementKind::Reservoir,
                    index,
                },
            );
        }
        info!("Drew {} reservoir markers", records.len());
        records.len()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn counties(&self) -> &[CountyShape] {
        &self.counties
    }

    pub fn reservoirs(&self) -> &[ReservoirMarker] {
        &self.reservoirs
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn reservoir(&self, id: &str) -> Option<&ReservoirMarker> {
        match self.registry.get(id)? {
            ElementRef {
                kind: ElementKind::Reservoir,
                index,
            } => self.reservoirs.get(index),
            _ => None,
        }
    }

    pub fn county(&self, id: &str) -> Option<&CountyShape> {
        match self.registry.get(id)? {
            ElementRef {
                kind: ElementKind::County,
                index,
            } => self.counties.get(index),
            _ => None,
        }
    }
}
