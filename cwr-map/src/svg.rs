//! Standalone SVG snapshot of a scene and its current marker styles.

use crate::controller::InteractionController;
use crate::scene::MapScene;
use crate::style::{MarkerStyle, COUNTY_FILL, COUNTY_OPACITY, COUNTY_STROKE, COUNTY_STROKE_WIDTH};
use std::collections::BTreeMap;
use std::fmt::Write;

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the scene. Markers missing from `styles` are drawn at baseline.
pub fn render_svg(scene: &MapScene, styles: &BTreeMap<String, MarkerStyle>, base_radius: f64) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="100%">"#,
        scene.width(),
        scene.height()
    );
    for county in scene.counties() {
        let _ = writeln!(
            svg,
            r#"  <path id="{}" class="zip" d="{}" fill="{}" stroke="{}" stroke-width="{}" opacity="{}"><title>{} County</title></path>"#,
            escape(&county.id),
            county.path,
            COUNTY_FILL,
            COUNTY_STROKE,
            COUNTY_STROKE_WIDTH,
            COUNTY_OPACITY,
            escape(&county.name),
        );
    }
    for marker in scene.reservoirs() {
        let style = styles
            .get(&marker.id)
            .copied()
            .unwrap_or_else(|| MarkerStyle::baseline(base_radius));
        let _ = writeln!(
            svg,
            r#"  <circle id="{}" class="{}" cx="{:.2}" cy="{:.2}" r="{}" fill="{}" stroke="{}"/>"#,
            escape(&marker.id),
            style.class(marker.important),
            marker.cx,
            marker.cy,
            style.radius,
            style.fill(),
            style.stroke(),
        );
    }
    svg.push_str("</svg>\n");
    svg
}

impl InteractionController {
    /// Snapshot of the map as it currently looks.
    pub fn to_svg(&self) -> String {
        render_svg(
            self.scene(),
            self.state().styled_markers(),
            self.config().base_radius,
        )
    }
}
