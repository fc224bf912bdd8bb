//! Spherical Mercator projection from longitude/latitude degrees to
//! screen pixels, plus SVG path generation for projected polygons.

use geo::{LineString, MultiPolygon};
use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt::Write;

/// Latitudes are clamped to the usual web-Mercator limit.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Mercator projection centered on `center` and placed so that the center
/// lands on `translate`. `scale` is pixels per radian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    /// (longitude, latitude) in degrees
    pub center: (f64, f64),
    pub scale: f64,
    /// Screen position of the center, in pixels
    pub translate: (f64, f64),
}

impl Mercator {
    pub fn new(center: (f64, f64), scale: f64, translate: (f64, f64)) -> Self {
        Self {
            center,
            scale,
            translate,
        }
    }

    /// Scale that shows California at zoom level 5 on 512px tiles.
    pub fn california_scale() -> f64 {
        512.0 * 0.5 / PI * 2f64.powi(5)
    }

    /// Projection used by the reservoir map: centered on the Sierra Nevada,
    /// in the middle of a `width` x `height` canvas.
    pub fn california(width: f64, height: f64) -> Self {
        Self::new(
            (-118.734060, 37.786874),
            Self::california_scale(),
            (width / 2.0, height / 2.0),
        )
    }

    /// Project a (longitude, latitude) pair in degrees to (x, y) pixels.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let x = self.translate.0 + self.scale * (longitude - self.center.0).to_radians();
        let y = self.translate.1 - self.scale * (mercator_y(latitude) - mercator_y(self.center.1));
        (x, y)
    }

    /// SVG path data for a (multi)polygon: one `M…Z` subpath per ring.
    pub fn path_data(&self, shape: &MultiPolygon<f64>) -> String {
        let mut d = String::new();
        for polygon in &shape.0 {
            self.push_ring(&mut d, polygon.exterior());
            for interior in polygon.interiors() {
                self.push_ring(&mut d, interior);
            }
        }
        d
    }

    fn push_ring(&self, d: &mut String, ring: &LineString<f64>) {
        let coords = &ring.0;
        // Closed rings repeat the first point; Z closes the subpath instead.
        let open_len = match (coords.first(), coords.last()) {
            (Some(first), Some(last)) if coords.len() > 1 && first == last => coords.len() - 1,
            _ => coords.len(),
        };
        if open_len < 2 {
            return;
        }
        for (i, c) in coords[..open_len].iter().enumerate() {
            let (x, y) = self.project(c.x, c.y);
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{}{:.2},{:.2}", cmd, x, y);
        }
        d.push('Z');
    }
}

fn mercator_y(latitude: f64) -> f64 {
    let phi = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (FRAC_PI_4 + phi / 2.0).tan().ln()
}
