//! geo.rs: coordinates and the viewport projection.
//!
//! Coordinates are plain WGS84 degrees. The SVG backend projects them with a
//! plate carrée viewport centred on the map view:
//!
//! ```
//! use poi_map::geo::{LatLng, Viewport};
//! let vp = Viewport::new(LatLng::new(0.0, 0.0), 2.0, 1200.0, 600.0);
//! let (x, y) = vp.project(LatLng::new(0.0, 0.0));
//! assert_eq!((x, y), (600.0, 300.0));
//! ```

use serde::{Deserialize, Serialize};

/// Tile edge in pixels; one tile spans the whole globe at zoom 0.
const TILE_SIZE: f64 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `true` when both components are finite and inside
    /// `lat ∈ [-90, 90]`, `lng ∈ [-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Initial view of a surface: where it is centred and how far zoomed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f64,
    #[serde(default = "default_zoom_control")]
    pub zoom_control: bool,
}

fn default_zoom_control() -> bool {
    true
}

impl MapView {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom, zoom_control: true }
    }
}

/// Pixel window onto the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, width: f64, height: f64) -> Self {
        Self { center, zoom, width, height }
    }

    pub fn from_view(view: &MapView, width: f64, height: f64) -> Self {
        Self::new(view.center, view.zoom, width, height)
    }

    /// Degrees covered by a single pixel at this zoom.
    pub fn degrees_per_pixel(&self) -> f64 {
        360.0 / (TILE_SIZE * 2f64.powf(self.zoom))
    }

    #[inline]
    pub fn project(&self, at: LatLng) -> (f64, f64) {
        let dpp = self.degrees_per_pixel();
        (
            (at.lng - self.center.lng) / dpp + self.width / 2.0,
            (self.center.lat - at.lat) / dpp + self.height / 2.0,
        )
    }

    /// Whether a projected point, grown by `margin` pixels, touches the window.
    pub fn contains(&self, (x, y): (f64, f64), margin: f64) -> bool {
        x >= -margin && x <= self.width + margin && y >= -margin && y <= self.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_and_non_finite() {
        assert!(LatLng::new(-15.78, -47.93).is_valid());
        assert!(LatLng::new(90.0, 180.0).is_valid());
        assert!(!LatLng::new(90.5, 0.0).is_valid());
        assert!(!LatLng::new(0.0, -180.1).is_valid());
        assert!(!LatLng::new(f64::NAN, 0.0).is_valid());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn projection_is_centred_and_north_up() {
        let vp = Viewport::new(LatLng::new(-15.78, -47.93), 5.0, 1200.0, 800.0);
        let (cx, cy) = vp.project(vp.center);
        assert!((cx - 600.0).abs() < 1e-9);
        assert!((cy - 400.0).abs() < 1e-9);

        // São Paulo lies south-east of Brasília.
        let (x, y) = vp.project(LatLng::new(-23.55, -46.63));
        assert!(x > cx);
        assert!(y > cy);
        assert!(vp.contains((x, y), 0.0));
    }

    #[test]
    fn zoom_halves_degrees_per_pixel() {
        let a = Viewport::new(LatLng::new(0.0, 0.0), 4.0, 100.0, 100.0);
        let b = Viewport::new(LatLng::new(0.0, 0.0), 5.0, 100.0, 100.0);
        assert!((a.degrees_per_pixel() / b.degrees_per_pixel() - 2.0).abs() < 1e-12);
    }
}
