//! Interaction controller.
//!
//! Pointer events over the map are turned into marker styles and tooltip
//! commands by [`apply_event`], a pure function of the previous state, the
//! event and the (immutable) connection tables and scene. The UI applies
//! the returned [`RenderCommand`]s; nothing here touches a rendering surface.
//!
//! Marker rules:
//! - hovering a reservoir highlights its neighbors, radius
//!   `base_radius + weight * scale_factor`
//! - hovering a county highlights its connected reservoirs at a flat radius
//! - clicking a reservoir selects it (radius `selected_radius`) and pins its
//!   neighbor highlights; clicking it again deselects it
//! - leaving any element clears everything except the selection's own set
//!
//! The selection always wins over transient hover highlights.

use crate::config::MapConfig;
use crate::connections::Connections;
use crate::scene::MapScene;
use crate::style::{Highlight, MarkerStyle};
use crate::tooltip::{TooltipContent, TooltipPresenter};
use cwr_geo::county::CountyFeature;
use cwr_geo::reservoir::ReservoirRecord;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A pointer event on a map element. Coordinates are page pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    HoverReservoir { id: String, x: f64, y: f64 },
    /// `name` is the county's display name, e.g. "Los Angeles".
    HoverCounty { name: String, x: f64, y: f64 },
    HoverExit,
    ClickReservoir { id: String },
}

/// A side effect for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RenderCommand {
    StyleMarker {
        id: String,
        style: MarkerStyle,
    },
    ShowTooltip {
        content: TooltipContent,
        left: f64,
        top: f64,
        opacity: f64,
        fade_ms: u32,
    },
    HideTooltip {
        fade_ms: u32,
    },
}

/// Highlights that only last while the pointer stays on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Transient {
    #[default]
    None,
    Neighbors(String),
    County(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    selection: Option<String>,
    hovered: Option<String>,
    transient: Transient,
    /// Styles of every marker that is not at baseline
    markers: BTreeMap<String, MarkerStyle>,
}

impl InteractionState {
    /// The pinned reservoir, if any.
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    /// The reservoir under the pointer, if any.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn marker_style(&self, id: &str, base_radius: f64) -> MarkerStyle {
        self.markers
            .get(id)
            .copied()
            .unwrap_or_else(|| MarkerStyle::baseline(base_radius))
    }

    /// Markers currently away from baseline.
    pub fn styled_markers(&self) -> &BTreeMap<String, MarkerStyle> {
        &self.markers
    }
}

/// Read-only inputs the state machine consults.
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub config: &'a MapConfig,
    pub connections: &'a Connections,
    pub scene: &'a MapScene,
}

/// Compute the state after `event` and the commands that render the change.
///
/// Events naming an element the scene doesn't have are no-ops. Marker
/// commands are emitted only for markers whose style actually changed.
pub fn apply_event(
    state: &InteractionState,
    event: &InteractionEvent,
    ctx: &InteractionContext<'_>,
) -> (InteractionState, Vec<RenderCommand>) {
    let mut next = state.clone();
    let presenter = TooltipPresenter::new(&ctx.config.tooltip);

    let tooltip = match event {
        InteractionEvent::HoverReservoir { id, x, y } => {
            let Some(marker) = ctx.scene.reservoir(id) else {
                debug!("Hover on unknown reservoir {}", id);
                return (next, Vec::new());
            };
            next.hovered = Some(id.clone());
            next.transient = Transient::Neighbors(id.clone());
            let content =
                TooltipContent::reservoir(&marker.record, next.selection.as_deref(), ctx.connections);
            Some(presenter.show(content, *x, *y))
        }
        InteractionEvent::HoverCounty { name, x, y } => {
            if ctx.scene.county(&cwr_utils::ids::element_id(name)).is_none() {
                debug!("Hover on unknown county {}", name);
                return (next, Vec::new());
            }
            next.hovered = None;
            next.transient = Transient::County(name.clone());
            Some(presenter.show(TooltipContent::county(name), *x, *y))
        }
        InteractionEvent::HoverExit => {
            next.hovered = None;
            next.transient = Transient::None;
            Some(presenter.hide())
        }
        InteractionEvent::ClickReservoir { id } => {
            if !ctx.scene.registry().is_reservoir(id) {
                debug!("Click on unknown reservoir {}", id);
                return (next, Vec::new());
            }
            next.transient = Transient::None;
            if next.selection.as_deref() == Some(id.as_str()) {
                next.selection = None;
                debug!("Deselected {}", id);
            } else {
                if let Some(previous) = next.selection.replace(id.clone()) {
                    debug!("Deselected {}", previous);
                }
                debug!("Selected {}", id);
            }
            None
        }
    };

    next.markers = derive_markers(&next, ctx);
    let mut commands = diff_markers(&state.markers, &next.markers, ctx.config.base_radius);
    commands.extend(tooltip);
    (next, commands)
}

fn derive_markers(state: &InteractionState, ctx: &InteractionContext<'_>) -> BTreeMap<String, MarkerStyle> {
    let config = ctx.config;
    let registry = ctx.scene.registry();
    let mut markers = BTreeMap::new();

    match &state.transient {
        Transient::None => {}
        Transient::Neighbors(of) => highlight_neighbors(&mut markers, of, ctx),
        Transient::County(name) => {
            for id in ctx.connections.county_reservoirs(name) {
                if registry.is_reservoir(id) {
                    markers.insert(
                        id.clone(),
                        MarkerStyle {
                            highlight: Some(Highlight::County),
                            ..MarkerStyle::baseline(config.county_highlight_radius)
                        },
                    );
                }
            }
        }
    }

    if let Some(selected) = &state.selection {
        highlight_neighbors(&mut markers, selected, ctx);
        markers.insert(
            selected.clone(),
            MarkerStyle {
                selected: true,
                ..MarkerStyle::baseline(config.selected_radius)
            },
        );
    }

    if let Some(hovered) = &state.hovered {
        if registry.is_reservoir(hovered) {
            markers
                .entry(hovered.clone())
                .or_insert_with(|| MarkerStyle::baseline(config.base_radius))
                .hovered = true;
        }
    }

    markers
}

fn highlight_neighbors(markers: &mut BTreeMap<String, MarkerStyle>, of: &str, ctx: &InteractionContext<'_>) {
    let registry = ctx.scene.registry();
    for (neighbor, weight) in ctx.connections.neighbors(of) {
        if neighbor == of || !registry.is_reservoir(neighbor) {
            continue;
        }
        markers.insert(
            neighbor.to_string(),
            MarkerStyle {
                highlight: Some(Highlight::Neighbor),
                ..MarkerStyle::baseline(ctx.config.weighted_radius(weight))
            },
        );
    }
}

fn diff_markers(
    before: &BTreeMap<String, MarkerStyle>,
    after: &BTreeMap<String, MarkerStyle>,
    base_radius: f64,
) -> Vec<RenderCommand> {
    let baseline = MarkerStyle::baseline(base_radius);
    let ids: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
    ids.into_iter()
        .filter_map(|id| {
            let old = before.get(id).copied().unwrap_or(baseline);
            let new = after.get(id).copied().unwrap_or(baseline);
            (old != new).then(|| RenderCommand::StyleMarker {
                id: id.clone(),
                style: new,
            })
        })
        .collect()
}

/// Owns the scene, the connection tables and the interaction state.
#[derive(Debug, Clone)]
pub struct InteractionController {
    config: MapConfig,
    connections: Connections,
    scene: MapScene,
    state: InteractionState,
}

impl InteractionController {
    pub fn new(config: MapConfig, connections: Connections) -> Self {
        let scene = MapScene::new(&config);
        Self {
            config,
            connections,
            scene,
            state: InteractionState::default(),
        }
    }

    pub fn draw_counties(&mut self, features: &[CountyFeature]) -> usize {
        self.scene.draw_counties(features)
    }

    pub fn draw_reservoirs(&mut self, records: &[ReservoirRecord]) -> usize {
        self.scene.draw_reservoirs(records, &self.connections)
    }

    /// Apply one event and return the commands that render it.
    pub fn dispatch(&mut self, event: &InteractionEvent) -> Vec<RenderCommand> {
        let ctx = InteractionContext {
            config: &self.config,
            connections: &self.connections,
            scene: &self.scene,
        };
        let (next, commands) = apply_event(&self.state, event, &ctx);
        self.state = next;
        commands
    }

    pub fn marker_style(&self, id: &str) -> MarkerStyle {
        self.state.marker_style(id, self.config.base_radius)
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn scene(&self) -> &MapScene {
        &self.scene
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn connections(&self) -> &Connections {
        &self.connections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tests::{SAMPLE_COUNTIES, SAMPLE_RESERVOIRS};

    const EPSILON: f64 = 1e-9;

    fn sample_controller() -> InteractionController {
        let mut controller =
            InteractionController::new(MapConfig::default(), Connections::embedded().unwrap());
        let counties = CountyFeature::parse_feature_collection(SAMPLE_COUNTIES).unwrap();
        controller.draw_counties(&counties);
        let reservoirs = ReservoirRecord::parse_reservoir_json(SAMPLE_RESERVOIRS).unwrap();
        controller.draw_reservoirs(&reservoirs);
        controller
    }

    fn hover(id: &str) -> InteractionEvent {
        InteractionEvent::HoverReservoir {
            id: id.to_string(),
            x: 400.0,
            y: 300.0,
        }
    }

    fn click(id: &str) -> InteractionEvent {
        InteractionEvent::ClickReservoir { id: id.to_string() }
    }

    fn hover_county(name: &str) -> InteractionEvent {
        InteractionEvent::HoverCounty {
            name: name.to_string(),
            x: 10.0,
            y: 50.0,
        }
    }

    fn tooltip_of(commands: &[RenderCommand]) -> Option<&TooltipContent> {
        commands.iter().find_map(|c| match c {
            RenderCommand::ShowTooltip { content, .. } => Some(content),
            _ => None,
        })
    }

    fn marker_ids(controller: &InteractionController) -> Vec<String> {
        controller.scene().reservoirs().iter().map(|m| m.id.clone()).collect()
    }

    fn assert_all_baseline(controller: &InteractionController) {
        for id in marker_ids(controller) {
            let style = controller.marker_style(&id);
            assert!(style.is_baseline(5.0), "{} is not at baseline: {:?}", id, style);
            assert_eq!(style.fill(), "black");
            assert_eq!(style.stroke(), "black");
            assert!(!style.class(false).contains("highlighted"));
        }
    }

    #[test]
    fn hover_highlights_exactly_the_neighbor_set() {
        let reference = sample_controller();
        for id in marker_ids(&reference) {
            let mut controller = sample_controller();
            controller.dispatch(&hover(&id));
            for other in marker_ids(&controller) {
                let style = controller.marker_style(&other);
                match controller.connections().weight(&id, &other) {
                    Some(weight) if other != id => {
                        assert_eq!(style.highlight, Some(Highlight::Neighbor), "{} -> {}", id, other);
                        assert!((style.radius - (5.0 + weight * 30.0)).abs() < EPSILON);
                    }
                    _ => assert_eq!(style.highlight, None, "{} -> {}", id, other),
                }
            }
            assert!(controller.marker_style(&id).hovered);
        }
    }

    #[test]
    fn hover_hetch_hetchy_radii() {
        let mut controller = sample_controller();
        let commands = controller.dispatch(&hover("HTH"));
        assert!((controller.marker_style("CHV").radius - 13.676).abs() < 1e-6);
        assert!((controller.marker_style("LEW").radius - 5.405).abs() < 1e-6);
        assert!((controller.marker_style("DNP").radius - 19.133).abs() < 1e-6);
        // NML and EXC are in the table but not on the map
        assert_eq!(controller.state().styled_markers().len(), 4);
        // HTH (hovered) plus three neighbors, then the tooltip
        assert_eq!(commands.len(), 5);
        assert!(matches!(commands.last(), Some(RenderCommand::ShowTooltip { .. })));
    }

    #[test]
    fn click_twice_returns_to_idle() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        assert_eq!(controller.state().selection(), Some("HTH"));
        let selected = controller.marker_style("HTH");
        assert!(selected.selected);
        assert_eq!(selected.radius, 10.0);

        controller.dispatch(&click("HTH"));
        assert_eq!(controller.state().selection(), None);
        assert_all_baseline(&controller);
    }

    #[test]
    fn click_while_hovering_then_deselect_keeps_hover_look() {
        let mut controller = sample_controller();
        controller.dispatch(&hover("HTH"));
        controller.dispatch(&click("HTH"));
        controller.dispatch(&click("HTH"));
        let style = controller.marker_style("HTH");
        assert!(!style.selected);
        assert!(style.hovered);
        assert_eq!(style.radius, 5.0);
        assert!(controller.marker_style("CHV").is_baseline(5.0));
    }

    #[test]
    fn selection_survives_unrelated_hover() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        let chv_selected = controller.marker_style("CHV");

        controller.dispatch(&hover("SHA"));
        assert!(controller.marker_style("HTH").selected);
        assert_eq!(controller.marker_style("HTH").radius, 10.0);
        assert_eq!(controller.marker_style("CHV"), chv_selected);
        assert!(controller.marker_style("SHA").hovered);

        controller.dispatch(&InteractionEvent::HoverExit);
        assert!(controller.marker_style("HTH").selected);
        assert_eq!(controller.marker_style("CHV"), chv_selected);
        assert!(controller.marker_style("SHA").is_baseline(5.0));
    }

    #[test]
    fn hover_during_selection_adds_transient_neighbors() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        let pinned = controller.state().styled_markers().clone();

        controller.dispatch(&hover("SHA"));
        let oro = controller.marker_style("ORO");
        assert_eq!(oro.highlight, Some(Highlight::Neighbor));
        assert!((oro.radius - (5.0 + 0.6215 * 30.0)).abs() < 1e-6);
        let trm = controller.marker_style("TRM");
        assert!((trm.radius - (5.0 + 0.1184 * 30.0)).abs() < 1e-6);
        // LEW neighbors both; the selection's weight wins
        assert!((controller.marker_style("LEW").radius - 5.405).abs() < 1e-6);
        assert!(controller.marker_style("HTH").selected);

        controller.dispatch(&InteractionEvent::HoverExit);
        assert!(controller.marker_style("ORO").is_baseline(5.0));
        assert!(controller.marker_style("TRM").is_baseline(5.0));
        assert_eq!(controller.state().styled_markers(), &pinned);
    }

    #[test]
    fn hovering_a_selected_neighbor_keeps_its_weighted_radius() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        controller.dispatch(&hover("LEW"));
        let lew = controller.marker_style("LEW");
        assert_eq!(lew.highlight, Some(Highlight::Neighbor));
        assert!(lew.hovered);
        assert!((lew.radius - 5.405).abs() < 1e-6);
    }

    #[test]
    fn selecting_another_reservoir_replaces_the_selection() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        controller.dispatch(&click("SHA"));
        assert_eq!(controller.state().selection(), Some("SHA"));
        assert!(!controller.marker_style("HTH").selected);
        assert!(controller.marker_style("CHV").is_baseline(5.0));
        assert!(controller.marker_style("SHA").selected);
        let lew = controller.marker_style("LEW");
        assert!((lew.radius - (5.0 + 0.4417 * 30.0)).abs() < 1e-6);
    }

    #[test]
    fn tooltip_weight_line_follows_the_selection() {
        let mut controller = sample_controller();
        let unselected = controller.dispatch(&hover("CHV"));
        assert_eq!(tooltip_of(&unselected).unwrap().lines.len(), 2);
        controller.dispatch(&InteractionEvent::HoverExit);

        controller.dispatch(&click("HTH"));
        let chv = controller.dispatch(&hover("CHV"));
        let content = tooltip_of(&chv).unwrap();
        assert_eq!(content.title, "Lake Eleanor (CHV)");
        assert_eq!(content.lines[2], "Connection weight: 0.2892");
        controller.dispatch(&InteractionEvent::HoverExit);

        let lew = controller.dispatch(&hover("LEW"));
        assert_eq!(tooltip_of(&lew).unwrap().lines[2], "Connection weight: 0.0135");
        controller.dispatch(&InteractionEvent::HoverExit);

        let sha = controller.dispatch(&hover("SHA"));
        assert_eq!(tooltip_of(&sha).unwrap().lines.len(), 2);
    }

    #[test]
    fn hover_exit_without_selection_resets_everything() {
        let mut controller = sample_controller();
        controller.dispatch(&hover("SHA"));
        assert!(!controller.state().styled_markers().is_empty());

        let commands = controller.dispatch(&InteractionEvent::HoverExit);
        assert_all_baseline(&controller);
        assert!(controller.state().styled_markers().is_empty());
        assert_eq!(commands.last(), Some(&RenderCommand::HideTooltip { fade_ms: 500 }));
        for command in &commands[..commands.len() - 1] {
            match command {
                RenderCommand::StyleMarker { style, .. } => assert!(style.is_baseline(5.0)),
                other => panic!("unexpected command {:?}", other),
            }
        }
    }

    #[test]
    fn reservoir_without_connections_only_shows_tooltip() {
        let mut controller = sample_controller();
        let commands = controller.dispatch(&hover("PNF"));
        let content = tooltip_of(&commands).unwrap();
        assert_eq!(content.title, "Pine Flat Lake (PNF)");
        assert_eq!(content.lines, vec!["Elevation: 951", "Capacity: 1000000"]);
        assert_eq!(controller.state().styled_markers().len(), 1);
        assert!(controller.marker_style("PNF").hovered);
    }

    #[test]
    fn county_hover_applies_flat_highlight() {
        let mut controller = sample_controller();
        let commands = controller.dispatch(&hover_county("Los Angeles"));
        assert_eq!(tooltip_of(&commands).unwrap().title, "Los Angeles County");
        for id in ["SHA", "CCH"] {
            let style = controller.marker_style(id);
            assert_eq!(style.highlight, Some(Highlight::County));
            assert_eq!(style.radius, 10.0);
        }
        // SCC, FRD and BCL are not drawn
        assert_eq!(controller.state().styled_markers().len(), 2);

        controller.dispatch(&InteractionEvent::HoverExit);
        assert_all_baseline(&controller);
    }

    #[test]
    fn county_hover_leaves_selection_set_alone() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        let before = controller.state().styled_markers().clone();

        let commands = controller.dispatch(&hover_county("San Francisco"));
        assert_eq!(controller.state().styled_markers(), &before);
        assert_eq!(commands.len(), 1);

        controller.dispatch(&InteractionEvent::HoverExit);
        assert_eq!(controller.state().styled_markers(), &before);
    }

    #[test]
    fn unknown_elements_are_no_ops() {
        let mut controller = sample_controller();
        controller.dispatch(&click("HTH"));
        let before = controller.state().clone();
        assert!(controller.dispatch(&hover("NOPE")).is_empty());
        assert!(controller.dispatch(&click("NOPE")).is_empty());
        assert!(controller.dispatch(&click("LosAngeles")).is_empty());
        assert!(controller.dispatch(&hover_county("Atlantis")).is_empty());
        assert_eq!(controller.state(), &before);

        controller.dispatch(&hover("SHA"));
        let hovering = controller.state().clone();
        assert!(controller.dispatch(&hover_county("Atlantis")).is_empty());
        assert_eq!(controller.state(), &hovering);
        controller.dispatch(&InteractionEvent::HoverExit);
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn repeated_hover_only_reshows_tooltip() {
        let mut controller = sample_controller();
        controller.dispatch(&hover("HTH"));
        let commands = controller.dispatch(&hover("HTH"));
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], RenderCommand::ShowTooltip { top, .. } if top == 270.0));
    }

    #[test]
    fn apply_event_leaves_input_state_untouched() {
        let controller = sample_controller();
        let ctx = InteractionContext {
            config: controller.config(),
            connections: controller.connections(),
            scene: controller.scene(),
        };
        let start = InteractionState::default();
        let (next, commands) = apply_event(&start, &click("SHA"), &ctx);
        assert_eq!(start, InteractionState::default());
        assert_eq!(next.selection(), Some("SHA"));
        assert!(!commands.is_empty());
        assert!(commands
            .iter()
            .all(|c| matches!(c, RenderCommand::StyleMarker { .. })));
    }

    #[test]
    fn empty_reservoir_layer_is_quiet() {
        let mut controller =
            InteractionController::new(MapConfig::default(), Connections::embedded().unwrap());
        controller.draw_counties(&CountyFeature::parse_feature_collection(SAMPLE_COUNTIES).unwrap());
        assert_eq!(controller.draw_reservoirs(&[]), 0);
        let commands = controller.dispatch(&hover_county("Los Angeles"));
        assert_eq!(commands.len(), 1);
        let commands = controller.dispatch(&InteractionEvent::HoverExit);
        assert_eq!(commands, vec![RenderCommand::HideTooltip { fade_ms: 500 }]);
    }
}
