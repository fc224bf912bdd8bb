//! Tooltip presenter: what the floating panel says, where it goes and how
//! it fades.

use crate::config::TooltipConfig;
use crate::connections::Connections;
use crate::controller::RenderCommand;
use cwr_geo::reservoir::ReservoirRecord;
use cwr_utils::measurements::format_measurement;
use serde::Serialize;

/// Text of the tooltip panel: a bold title followed by plain lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl TooltipContent {
    /// Content for a hovered county polygon.
    pub fn county(name: &str) -> Self {
        Self {
            title: format!("{} County", name),
            lines: Vec::new(),
        }
    }

    /// Content for a hovered reservoir.
    ///
    /// The connection weight line only appears while a reservoir is
    /// selected and the table has an edge from the selection to `record`.
    pub fn reservoir(record: &ReservoirRecord, selection: Option<&str>, connections: &Connections) -> Self {
        let mut lines = vec![
            format!("Elevation: {}", format_measurement(record.elevation)),
            format!("Capacity: {}", format_measurement(record.capacity)),
        ];
        if let Some(weight) = selection.and_then(|s| connections.weight(s, &record.element_id())) {
            lines.push(format!("Connection weight: {}", weight));
        }
        Self {
            title: format!("{} ({})", record.lake_name, record.name),
            lines,
        }
    }
}

/// Builds show/hide commands from the configured timing.
#[derive(Debug, Clone, Copy)]
pub struct TooltipPresenter<'a> {
    config: &'a TooltipConfig,
}

impl<'a> TooltipPresenter<'a> {
    pub fn new(config: &'a TooltipConfig) -> Self {
        Self { config }
    }

    /// Fade the panel in at the pointer, shifted by the vertical offset.
    pub fn show(&self, content: TooltipContent, x: f64, y: f64) -> RenderCommand {
        RenderCommand::ShowTooltip {
            content,
            left: x,
            top: y + self.config.offset_y,
            opacity: self.config.opacity,
            fade_ms: self.config.fade_in_ms,
        }
    }

    pub fn hide(&self) -> RenderCommand {
        RenderCommand::HideTooltip {
            fade_ms: self.config.fade_out_ms,
        }
    }
}

/// What the UI currently shows for the tooltip panel.
///
/// Content is kept after a hide so the text doesn't vanish mid-fade.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipView {
    pub content: Option<TooltipContent>,
    pub left: f64,
    pub top: f64,
    pub opacity: f64,
    pub fade_ms: u32,
}

impl TooltipView {
    /// Apply a tooltip command. Marker commands are ignored.
    pub fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::ShowTooltip {
                content,
                left,
                top,
                opacity,
                fade_ms,
            } => {
                self.content = Some(content.clone());
                self.left = *left;
                self.top = *top;
                self.opacity = *opacity;
                self.fade_ms = *fade_ms;
            }
            RenderCommand::HideTooltip { fade_ms } => {
                self.opacity = 0.0;
                self.fade_ms = *fade_ms;
            }
            RenderCommand::StyleMarker { .. } => {}
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.content.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hetch_hetchy() -> ReservoirRecord {
        ReservoirRecord {
            name: "HTH".to_string(),
            lake_name: "Hetch Hetchy Reservoir".to_string(),
            latitude: 37.946,
            longitude: -119.787,
            elevation: Some(3796.0),
            capacity: Some(360360.0),
        }
    }

    #[test]
    fn county_title() {
        let content = TooltipContent::county("Los Angeles");
        assert_eq!(content.title, "Los Angeles County");
        assert!(content.lines.is_empty());
    }

    #[test]
    fn reservoir_without_selection() {
        let connections = Connections::embedded().unwrap();
        let content = TooltipContent::reservoir(&hetch_hetchy(), None, &connections);
        assert_eq!(content.title, "Hetch Hetchy Reservoir (HTH)");
        assert_eq!(content.lines, vec!["Elevation: 3796", "Capacity: 360360"]);
    }

    #[test]
    fn reservoir_missing_measurements() {
        let connections = Connections::default();
        let mut record = hetch_hetchy();
        record.capacity = None;
        let content = TooltipContent::reservoir(&record, None, &connections);
        assert_eq!(content.lines[1], "Capacity: n/a");
    }

    #[test]
    fn weight_line_requires_edge_from_selection() {
        let connections = Connections::from_json(r#"{ "reservoirs": { "SHA": { "HTH": 0.5 } } }"#).unwrap();
        let with_edge = TooltipContent::reservoir(&hetch_hetchy(), Some("SHA"), &connections);
        assert_eq!(with_edge.lines.last().unwrap(), "Connection weight: 0.5");

        let no_edge = TooltipContent::reservoir(&hetch_hetchy(), Some("ORO"), &connections);
        assert_eq!(no_edge.lines.len(), 2);
    }

    #[test]
    fn show_offsets_and_fades_in() {
        let config = TooltipConfig::default();
        let presenter = TooltipPresenter::new(&config);
        let command = presenter.show(TooltipContent::county("Inyo"), 120.0, 300.0);
        let mut view = TooltipView::default();
        view.apply(&command);
        assert!(view.is_visible());
        assert_eq!(view.left, 120.0);
        assert_eq!(view.top, 270.0);
        assert_eq!(view.opacity, 0.9);
        assert_eq!(view.fade_ms, 200);

        view.apply(&presenter.hide());
        assert!(!view.is_visible());
        assert_eq!(view.fade_ms, 500);
        assert_eq!(view.content.unwrap().title, "Inyo County");
    }
}
