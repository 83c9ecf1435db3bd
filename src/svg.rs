//! svg.rs: a rendering backend that draws the surface as one SVG document.
//!
//! Tiles cannot be fetched into a static file, so the tile layer only
//! contributes its attribution; land comes from an optional GeoJSON basemap
//! (country polygons) drawn in the dark theme. Attached markers are drawn in
//! attachment order with their tip on the projected coordinate.

use serde_json::Value;

use crate::{
    error::BackendError,
    geo::{LatLng, MapView, Viewport},
    icon::Glyph,
    points::Category,
    popup::escape,
    surface::{LayerId, MapSurface, RenderBackend, TileLayer},
};

const OCEAN:  &str = "#0e0e10";
const LAND:   &str = "#1c1c1f";
const BORDER: &str = "#2e2e33";
const GRID:   &str = "#17171a";
const TEXT:   &str = "#e2e8f0";
const MUTED:  &str = "#64748b";

/// Graticule spacing in degrees.
const GRID_STEP: i32 = 10;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SvgBackend {
    width: f64,
    height: f64,
    basemap: Option<Value>,
}

impl SvgBackend {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, basemap: None }
    }

    /// Country polygons (a GeoJSON FeatureCollection) drawn as land.
    pub fn with_basemap(mut self, geojson: Value) -> Self {
        self.basemap = Some(geojson);
        self
    }
}

impl RenderBackend for SvgBackend {
    type Surface = SvgSurface;

    fn create_surface(&self, container: &str, view: MapView) -> Result<SvgSurface, BackendError> {
        if container.trim().is_empty() {
            return Err(BackendError::ContainerMissing(container.to_string()));
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(BackendError::Unavailable(format!(
                "canvas must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(SvgSurface {
            container: container.to_string(),
            view,
            viewport: Viewport::from_view(&view, self.width, self.height),
            basemap: self.basemap.clone(),
            tiles: Vec::new(),
            markers: Vec::new(),
            attached: Vec::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct SvgMarker {
    at: LatLng,
    glyph: Glyph,
    popup: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SvgSurface {
    container: String,
    view: MapView,
    viewport: Viewport,
    basemap: Option<Value>,
    tiles: Vec<TileLayer>,
    markers: Vec<SvgMarker>,
    /// Attached marker ids, in attachment order.
    attached: Vec<LayerId>,
}

impl MapSurface for SvgSurface {
    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tiles.push(layer.clone());
    }

    fn create_marker(&mut self, at: LatLng, icon: &Glyph) -> LayerId {
        self.markers.push(SvgMarker { at, glyph: icon.clone(), popup: None });
        LayerId(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: LayerId, html: String) {
        if let Some(m) = self.markers.get_mut(marker.0) {
            m.popup = Some(html);
        }
    }

    fn add_layer(&mut self, marker: LayerId) {
        if marker.0 < self.markers.len() && !self.has_layer(marker) {
            self.attached.push(marker);
        }
    }

    fn remove_layer(&mut self, marker: LayerId) {
        self.attached.retain(|id| *id != marker);
    }

    fn has_layer(&self, marker: LayerId) -> bool {
        self.attached.contains(&marker)
    }
}

impl SvgSurface {
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    pub fn popup(&self, marker: LayerId) -> Option<&str> {
        self.markers.get(marker.0)?.popup.as_deref()
    }

    pub fn render(&self) -> String {
        let vp = &self.viewport;
        let (w, h) = (vp.width, vp.height);
        let mut s = String::with_capacity(1 << 20);

        // header
        s.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" id="{}">
  <title>Points of interest</title>
"#,
            escape(&self.container)
        ));

        // background (ocean)
        s.push_str(&format!("  <rect width='{w}' height='{h}' fill='{OCEAN}'/>\n"));

        // graticule
        s.push_str(&format!("  <g stroke='{GRID}' stroke-width='0.5'>\n"));
        for lng in (-180..=180).step_by(GRID_STEP as usize) {
            let (x, _) = vp.project(LatLng::new(0.0, lng as f64));
            if (0.0..=w).contains(&x) {
                s.push_str(&format!("    <line x1='{x:.1}' y1='0' x2='{x:.1}' y2='{h}'/>\n"));
            }
        }
        for lat in (-90..=90).step_by(GRID_STEP as usize) {
            let (_, y) = vp.project(LatLng::new(lat as f64, 0.0));
            if (0.0..=h).contains(&y) {
                s.push_str(&format!("    <line x1='0' y1='{y:.1}' x2='{w}' y2='{y:.1}'/>\n"));
            }
        }
        s.push_str("  </g>\n");

        // land
        if let Some(features) = self.basemap.as_ref().and_then(|g| g["features"].as_array()) {
            s.push_str(&format!("  <g fill='{LAND}' stroke='{BORDER}' stroke-width='0.6'>\n"));
            for feature in features {
                for d in geometry_paths(&feature["geometry"], vp) {
                    s.push_str(&format!("    <path d='{d}'/>\n"));
                }
            }
            s.push_str("  </g>\n");
        }

        // markers
        s.push_str("  <g class='markers'>\n");
        for id in &self.attached {
            let m = &self.markers[id.0];
            let (x, y) = vp.project(m.at);
            if !vp.contains((x, y), m.glyph.size.1 as f64) {
                continue;
            }
            let tx = x - m.glyph.anchor.0 as f64;
            let ty = y - m.glyph.anchor.1 as f64;
            s.push_str(&format!("    <g transform='translate({tx:.1},{ty:.1})'>"));
            if let Some(popup) = &m.popup {
                s.push_str(&format!("<title>{}</title>", popup_text(popup)));
            }
            // Filter ids must be unique per document, not per category.
            s.push_str(&m.glyph.svg.replace("glow-", &format!("m{}-glow-", id.0)));
            s.push_str("</g>\n");
        }
        s.push_str("  </g>\n");

        // zoom control
        if self.view.zoom_control {
            s.push_str(&format!(
                "  <g font-family='monospace' font-size='16' fill='{TEXT}'>\n\
                 \x20   <rect x='10' y='10' width='28' height='56' rx='4' fill='#1f1f23' stroke='{BORDER}'/>\n\
                 \x20   <text x='18' y='32'>+</text>\n\
                 \x20   <text x='18' y='59'>−</text>\n\
                 \x20 </g>\n"
            ));
        }

        // legend
        let mut ly = h - 20.0 * Category::ALL.len() as f64 - 30.0;
        s.push_str(&format!("  <g font-family='monospace' font-size='12' fill='{TEXT}'>\n"));
        for c in Category::ALL {
            s.push_str(&format!(
                "    <circle cx='22.0' cy='{ly:.1}' r='6' fill='{}' stroke='{OCEAN}' stroke-width='0.8'/>\n",
                c.color()
            ));
            s.push_str(&format!("    <text x='32.0' y='{:.1}'>{c}</text>\n", ly + 4.5));
            ly += 20.0;
        }
        s.push_str(&format!(
            "    <text x='16.0' y='{:.1}' font-size='10' fill='{MUTED}'>showing {} of {} points</text>\n",
            h - 8.0,
            self.attached.len(),
            self.markers.len()
        ));
        s.push_str("  </g>\n");

        // attribution
        if !self.tiles.is_empty() {
            let credits: Vec<_> = self.tiles.iter().map(|t| escape(&t.attribution)).collect();
            s.push_str(&format!(
                "  <text x='{:.1}' y='{:.1}' text-anchor='end' font-family='sans-serif' font-size='10' fill='{MUTED}'>{}</text>\n",
                w - 8.0,
                h - 8.0,
                credits.join(" | ")
            ));
        }

        s.push_str("</svg>\n");
        s
    }
}

/// Popup HTML reduced to its text, entities left intact.
fn popup_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// GeoJSON → SVG paths
// ---------------------------------------------------------------------------

fn ring_to_path(coords: &[Value], vp: &Viewport) -> String {
    let mut d = String::new();
    for pt in coords {
        let arr = match pt.as_array() { Some(a) => a, None => continue };
        let lng = match arr.first().and_then(|v| v.as_f64()) { Some(v) => v, None => continue };
        let lat = match arr.get(1).and_then(|v| v.as_f64())  { Some(v) => v, None => continue };
        let (x, y) = vp.project(LatLng::new(lat, lng));
        let cmd = if d.is_empty() { 'M' } else { 'L' };
        d.push_str(&format!("{cmd}{x:.1},{y:.1}"));
    }
    if !d.is_empty() {
        d.push('Z');
    }
    d
}

fn geometry_paths(geom: &Value, vp: &Viewport) -> Vec<String> {
    let polygons: Vec<&Value> = match geom["type"].as_str().unwrap_or("") {
        "Polygon" => vec![&geom["coordinates"]],
        "MultiPolygon" => geom["coordinates"]
            .as_array()
            .map(|polys| polys.iter().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    polygons
        .into_iter()
        .filter_map(|poly| poly.as_array())
        .flatten()
        .filter_map(|ring| ring.as_array())
        .map(|pts| ring_to_path(pts, vp))
        .filter(|d| !d.is_empty())
        .collect()
}
