//! poi-map: plot categorized points of interest on a map and filter them
//! by category.
//!
//! The engine is backend-agnostic: anything implementing
//! [`surface::RenderBackend`] can host the markers. [`svg::SvgBackend`]
//! renders the surface as a standalone SVG document.

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod geo;
pub mod icon;
pub mod points;
pub mod popup;
pub mod registry;
pub mod surface;
pub mod svg;

pub use config::MapConfig;
pub use controller::{MapController, MapSession};
pub use error::{BackendError, FeedError};
pub use filter::{Filter, FilterGroup, FilterUi, UiEvent, ALL_TOKEN};
pub use geo::{LatLng, MapView};
pub use icon::{create_icon, Glyph, IconFactory};
pub use points::{Category, PointOfInterest, PointsSource, RawPoint};
pub use registry::{FilterOutcome, Marker, MarkerRegistry};
pub use surface::{LayerId, MapSurface, RenderBackend, TileLayer};
