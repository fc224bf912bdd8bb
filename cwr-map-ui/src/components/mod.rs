//! Reusable Dioxus RSX components for the reservoir map.

mod load_status;
mod map_canvas;
mod map_header;
mod tooltip_panel;

pub use load_status::LoadStatus;
pub use map_canvas::MapCanvas;
pub use map_header::MapHeader;
pub use tooltip_panel::TooltipPanel;
