//! config.rs: map settings, with defaults for a country-wide view of Brazil.
//!
//! Settings can come from a JSON file; every field is optional:
//!
//! ```json
//! { "points": "https://example.com/data/points.json", "zoom": 6 }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{geo::LatLng, surface::TileLayer};

pub const DEFAULT_POINTS: &str = "data/points.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Element id of the map container.
    pub container: String,
    pub center: LatLng,
    pub zoom: f64,
    pub zoom_control: bool,
    pub tiles: TileLayer,
    /// URL or file path of the points feed.
    pub points: String,
    /// Canvas size of rendered output, in pixels.
    pub width: f64,
    pub height: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container: "map".into(),
            center: LatLng::new(-15.7801, -47.9292),
            zoom: 5.0,
            zoom_control: true,
            tiles: TileLayer::carto_dark(),
            points: DEFAULT_POINTS.into(),
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl MapConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let body = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&body).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}
