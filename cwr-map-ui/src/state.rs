//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//!
//! The controller signal is only written by [`AppState::dispatch`]; the
//! drawn layers are copied out once per load phase by
//! [`AppState::publish_scene`], so hovering doesn't re-render the polygons.

use cwr_map::config::MapConfig;
use cwr_map::controller::{InteractionController, InteractionEvent, RenderCommand};
use cwr_map::scene::{CountyShape, ReservoirMarker};
use cwr_map::style::MarkerStyle;
use cwr_map::tooltip::TooltipView;
use dioxus::prelude::*;
use std::collections::HashMap;

#[derive(Clone, Copy)]
pub struct AppState {
    pub config: Signal<MapConfig>,
    /// Scene, connection tables and selection (None until counties load)
    pub controller: Signal<Option<InteractionController>>,
    /// Whether data is still loading
    pub loading: Signal<bool>,
    /// Error message if a data layer failed to load
    pub error_msg: Signal<Option<String>>,
    /// Drawn county shapes
    pub counties: Signal<Vec<CountyShape>>,
    /// Drawn reservoir markers
    pub reservoirs: Signal<Vec<ReservoirMarker>>,
    /// Last style applied to each marker; absent means baseline
    pub marker_styles: Signal<HashMap<String, MarkerStyle>>,
    pub tooltip: Signal<TooltipView>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            config: Signal::new(MapConfig::default()),
            controller: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            counties: Signal::new(Vec::new()),
            reservoirs: Signal::new(Vec::new()),
            marker_styles: Signal::new(HashMap::new()),
            tooltip: Signal::new(TooltipView::default()),
        }
    }

    /// Copy the drawn layers out of the controller for rendering.
    pub fn publish_scene(mut self) {
        let (counties, reservoirs) = match self.controller.peek().as_ref() {
            Some(controller) => (
                controller.scene().counties().to_vec(),
                controller.scene().reservoirs().to_vec(),
            ),
            None => return,
        };
        self.counties.set(counties);
        self.reservoirs.set(reservoirs);
    }

    /// Run an event through the controller and render the outcome.
    pub fn dispatch(mut self, event: InteractionEvent) {
        let commands = match self.controller.write().as_mut() {
            Some(controller) => controller.dispatch(&event),
            None => return,
        };
        self.apply(&commands);
    }

    pub fn apply(mut self, commands: &[RenderCommand]) {
        for command in commands {
            match command {
                RenderCommand::StyleMarker { id, style } => {
                    self.marker_styles.write().insert(id.clone(), *style);
                }
                RenderCommand::ShowTooltip { .. } | RenderCommand::HideTooltip { .. } => {
                    self.tooltip.write().apply(command);
                }
            }
        }
    }

    /// Current style of a marker.
    pub fn marker_style(&self, id: &str) -> MarkerStyle {
        let base_radius = self.config.read().base_radius;
        self.marker_styles
            .read()
            .get(id)
            .copied()
            .unwrap_or_else(|| MarkerStyle::baseline(base_radius))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
