//! registry.rs: the markers placed on a surface.
//!
//! Markers are built once from the validated points and afterwards only
//! attached or detached. The attached set always equals the markers whose
//! category the current [`Filter`] admits.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    filter::Filter,
    icon::IconFactory,
    points::PointOfInterest,
    popup::popup_html,
    surface::{LayerId, MapSurface},
};

#[derive(Debug, Clone)]
pub struct Marker {
    pub layer: LayerId,
    pub point: PointOfInterest,
}

impl Marker {
    pub fn category(&self) -> &str {
        &self.point.category
    }
}

/// Attach/detach work done by one [`MarkerRegistry::apply_filter`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub attached: usize,
    pub detached: usize,
}

impl FilterOutcome {
    pub fn is_noop(&self) -> bool {
        self.attached == 0 && self.detached == 0
    }
}

#[derive(Debug, Default)]
pub struct MarkerRegistry {
    markers: Vec<Marker>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create, popup-bind and attach one marker per point, in input order.
    ///
    /// A registry that already holds markers is left untouched.
    pub fn initialize<S: MapSurface>(
        &mut self,
        surface: &mut S,
        points: Vec<PointOfInterest>,
        icons: &mut IconFactory,
    ) {
        if !self.markers.is_empty() {
            warn!(existing = self.markers.len(), "markers already initialized; ignoring");
            return;
        }
        self.markers.reserve(points.len());
        for point in points {
            let icon = icons.create_icon(&point.category);
            let layer = surface.create_marker(point.position, &icon);
            surface.bind_popup(layer, popup_html(&point));
            surface.add_layer(layer);
            self.markers.push(Marker { layer, point });
        }
        debug!(markers = self.markers.len(), "markers attached");
    }

    pub fn apply_filter<S: MapSurface>(&self, surface: &mut S, filter: &Filter) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for marker in &self.markers {
            let show = filter.admits(marker.category());
            let on = surface.has_layer(marker.layer);
            if show && !on {
                surface.add_layer(marker.layer);
                outcome.attached += 1;
            } else if !show && on {
                surface.remove_layer(marker.layer);
                outcome.detached += 1;
            }
        }
        debug!(%filter, attached = outcome.attached, detached = outcome.detached, "filter applied");
        outcome
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn visible_count<S: MapSurface>(&self, surface: &S) -> usize {
        self.markers.iter().filter(|m| surface.has_layer(m.layer)).count()
    }

    pub fn visible_names<S: MapSurface>(&self, surface: &S) -> Vec<&str> {
        self.markers
            .iter()
            .filter(|m| surface.has_layer(m.layer))
            .map(|m| m.point.name.as_str())
            .collect()
    }

    /// Markers per raw category label.
    pub fn category_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.markers {
            *counts.entry(m.category()).or_insert(0) += 1;
        }
        counts
    }
}
