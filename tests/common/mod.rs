//! In-memory stand-ins for the rendering backend and the filter bar.

#![allow(dead_code)]

use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

use poi_map::{
    BackendError, FeedError, FilterUi, Glyph, LatLng, LayerId, MapSurface, MapView, PointsSource,
    RawPoint, RenderBackend, TileLayer,
};

#[derive(Debug, Default)]
pub struct Calls {
    pub created: usize,
    pub adds: usize,
    pub removes: usize,
}

#[derive(Debug)]
pub struct FakeMarker {
    pub at: LatLng,
    pub color: &'static str,
    pub popup: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub container: String,
    pub view: Option<MapView>,
    pub tiles: Vec<TileLayer>,
    pub markers: Vec<FakeMarker>,
    pub attached: BTreeSet<LayerId>,
    pub calls: Rc<RefCell<Calls>>,
}

impl FakeSurface {
    pub fn attached_colors(&self) -> Vec<&'static str> {
        self.attached.iter().map(|id| self.markers[id.0].color).collect()
    }
}

impl MapSurface for FakeSurface {
    fn add_tile_layer(&mut self, layer: &TileLayer) {
        self.tiles.push(layer.clone());
    }

    fn create_marker(&mut self, at: LatLng, icon: &Glyph) -> LayerId {
        self.calls.borrow_mut().created += 1;
        self.markers.push(FakeMarker { at, color: icon.color, popup: None });
        LayerId(self.markers.len() - 1)
    }

    fn bind_popup(&mut self, marker: LayerId, html: String) {
        self.markers[marker.0].popup = Some(html);
    }

    fn add_layer(&mut self, marker: LayerId) {
        self.calls.borrow_mut().adds += 1;
        self.attached.insert(marker);
    }

    fn remove_layer(&mut self, marker: LayerId) {
        self.calls.borrow_mut().removes += 1;
        self.attached.remove(&marker);
    }

    fn has_layer(&self, marker: LayerId) -> bool {
        self.attached.contains(&marker)
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub unavailable: bool,
    pub calls: Rc<RefCell<Calls>>,
}

impl RenderBackend for FakeBackend {
    type Surface = FakeSurface;

    fn create_surface(&self, container: &str, view: MapView) -> Result<FakeSurface, BackendError> {
        if self.unavailable {
            return Err(BackendError::Unavailable("library not loaded".into()));
        }
        Ok(FakeSurface {
            container: container.to_string(),
            view: Some(view),
            calls: Rc::clone(&self.calls),
            ..Default::default()
        })
    }
}

/// Feed backed by a JSON string, or by an error.
pub struct StaticSource(pub Result<String, u16>);

impl StaticSource {
    pub fn json(body: &str) -> Self {
        Self(Ok(body.to_string()))
    }

    pub fn status(code: u16) -> Self {
        Self(Err(code))
    }
}

impl PointsSource for StaticSource {
    fn fetch_points(&self) -> Result<Vec<RawPoint>, FeedError> {
        match &self.0 {
            Ok(body) => poi_map::points::parse_points(body),
            Err(status) => Err(FeedError::Status { url: "static".into(), status: *status }),
        }
    }

    fn describe(&self) -> String {
        "static".into()
    }
}

#[derive(Debug)]
pub struct Buttons {
    pub tokens: Vec<String>,
    pub active: Vec<bool>,
}

impl Buttons {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            active: vec![false; tokens.len()],
        }
    }

    pub fn active_indices(&self) -> Vec<usize> {
        self.active
            .iter()
            .enumerate()
            .filter(|(_, a)| **a)
            .map(|(i, _)| i)
            .collect()
    }
}

impl FilterUi for Buttons {
    fn filter_tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn set_active(&mut self, index: usize, active: bool) {
        self.active[index] = active;
    }
}

pub const TWO_POINTS: &str = r#"[
    {"lat": -15.78, "lng": -47.93, "name": "Clínica A", "type": "Hospital",
     "address": "Rua X", "category": "hospital"},
    {"lat": -23.55, "lng": -46.63, "name": "Escola B", "type": "Escola",
     "address": "Rua Y", "category": "escola"}
]"#;
