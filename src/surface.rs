//! surface.rs: what the engine needs from a map rendering library.
//!
//! A [`RenderBackend`] hands out surfaces; a [`MapSurface`] holds tile layers
//! and markers. Markers are created detached and addressed by [`LayerId`].

use serde::{Deserialize, Serialize};

use crate::{error::BackendError, geo::{LatLng, MapView}, icon::Glyph};

/// Handle to a marker owned by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

/// Raster tile source drawn beneath the markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
    pub subdomains: String,
    pub max_zoom: u8,
}

impl TileLayer {
    /// CARTO's dark basemap.
    pub fn carto_dark() -> Self {
        Self {
            url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png".into(),
            attribution: "© OpenStreetMap contributors © CARTO".into(),
            subdomains: "abcd".into(),
            max_zoom: 19,
        }
    }
}

impl Default for TileLayer {
    fn default() -> Self {
        Self::carto_dark()
    }
}

pub trait MapSurface {
    fn add_tile_layer(&mut self, layer: &TileLayer);

    /// Create a detached marker.
    fn create_marker(&mut self, at: LatLng, icon: &Glyph) -> LayerId;

    fn bind_popup(&mut self, marker: LayerId, html: String);

    /// Attach a marker. Attaching an attached marker does nothing.
    fn add_layer(&mut self, marker: LayerId);

    /// Detach a marker without destroying it.
    fn remove_layer(&mut self, marker: LayerId);

    fn has_layer(&self, marker: LayerId) -> bool;
}

pub trait RenderBackend {
    type Surface: MapSurface;

    fn create_surface(&self, container: &str, view: MapView)
        -> Result<Self::Surface, BackendError>;
}
