//! points.rs: the points-of-interest feed.
//!
//! The feed is a JSON array of flat objects:
//!
//! ```json
//! [{ "lat": -15.78, "lng": -47.93, "name": "Clínica A",
//!    "type": "Hospital", "address": "Rua X", "category": "hospital" }]
//! ```
//!
//! Sources report failures as [`FeedError`]; deciding what an unreachable
//! feed means for the map is left to the caller.

use std::{fmt, fs};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::FeedError, geo::LatLng};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Known point categories. Anything else renders as [`Category::Outro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Hospital,
    Escola,
    Academia,
    Empresa,
    Condominio,
    Outro,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Hospital,
        Category::Escola,
        Category::Academia,
        Category::Empresa,
        Category::Condominio,
        Category::Outro,
    ];

    /// Map a raw feed label to a category. Unknown labels fall back to `Outro`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "hospital" => Category::Hospital,
            "escola" => Category::Escola,
            "academia" => Category::Academia,
            "empresa" => Category::Empresa,
            "condominio" => Category::Condominio,
            _ => Category::Outro,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Hospital => "hospital",
            Category::Escola => "escola",
            Category::Academia => "academia",
            Category::Empresa => "empresa",
            Category::Condominio => "condominio",
            Category::Outro => "outro",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Hospital => "#00D4FF",
            Category::Escola => "#00FF88",
            Category::Academia => "#FFD700",
            Category::Empresa => "#FF8C00",
            Category::Condominio => "#FF4488",
            Category::Outro => "#AAAAAA",
        }
    }

    /// `true` if `label` names one of the enumerated categories verbatim.
    pub fn is_known(label: &str) -> bool {
        Category::ALL.iter().any(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Feed records
// ---------------------------------------------------------------------------

/// One record exactly as it appears in the feed, before validation.
///
/// Decoding never fails on a field's type: a non-numeric coordinate becomes
/// NaN (rejected later as invalid) and non-string text becomes empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPoint {
    #[serde(default, deserialize_with = "lenient_coord")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coord")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
}

/// `null` reads as missing; any other non-number as NaN.
fn lenient_coord<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => None,
        v => Some(v.as_f64().unwrap_or(f64::NAN)),
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Why a feed record was left off the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingCoordinates,
    InvalidCoordinates,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingCoordinates => f.write_str("missing lat/lng"),
            Rejection::InvalidCoordinates => f.write_str("lat/lng out of range"),
        }
    }
}

impl RawPoint {
    pub fn validate(self) -> Result<PointOfInterest, Rejection> {
        let (lat, lng) = match (self.lat, self.lng) {
            (Some(la), Some(lo)) => (la, lo),
            _ => return Err(Rejection::MissingCoordinates),
        };
        let position = LatLng::new(lat, lng);
        if !position.is_valid() {
            return Err(Rejection::InvalidCoordinates);
        }
        Ok(PointOfInterest {
            position,
            name: self.name,
            kind: self.kind,
            address: self.address,
            category: self.category,
        })
    }
}

/// A validated point, safe to place on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    pub position: LatLng,
    pub name: String,
    /// Free-text kind shown in the popup ("Hospital", "Escola", ...).
    pub kind: String,
    pub address: String,
    /// Raw category label from the feed; filters compare against this.
    pub category: String,
}

impl PointOfInterest {
    pub fn category_kind(&self) -> Category {
        Category::from_label(&self.category)
    }
}

/// Validate feed records in order, dropping (and logging) the bad ones.
pub fn validate_points(raw: Vec<RawPoint>) -> Vec<PointOfInterest> {
    let total = raw.len();
    let points: Vec<_> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let name = record.name.clone();
            match record.validate() {
                Ok(p) => Some(p),
                Err(reason) => {
                    warn!(index, name = %name, %reason, "skipping point");
                    None
                }
            }
        })
        .collect();
    debug!(accepted = points.len(), total, "validated points feed");
    points
}

/// Decode a feed body. Only the outer array is strict; an element that is
/// not an object turns into a record without coordinates.
pub fn parse_points(body: &str) -> Result<Vec<RawPoint>, FeedError> {
    Ok(records(serde_json::from_str(body)?))
}

fn records(values: Vec<Value>) -> Vec<RawPoint> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap_or_default())
        .collect()
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Anything that can hand over the raw feed in one attempt.
pub trait PointsSource {
    fn fetch_points(&self) -> Result<Vec<RawPoint>, FeedError>;

    /// Where the points come from, for diagnostics.
    fn describe(&self) -> String;
}

/// Feed served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpPointsSource {
    url: String,
}

impl HttpPointsSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl PointsSource for HttpPointsSource {
    fn fetch_points(&self) -> Result<Vec<RawPoint>, FeedError> {
        let resp = ureq::get(&self.url)
            .set("Accept-Encoding", "identity")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(status, _) => FeedError::Status {
                    url: self.url.clone(),
                    status,
                },
                ureq::Error::Transport(t) => FeedError::Transport {
                    url: self.url.clone(),
                    source: Box::new(t),
                },
            })?;
        Ok(records(serde_json::from_reader(resp.into_reader())?))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Feed read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FilePointsSource {
    path: String,
}

impl FilePointsSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PointsSource for FilePointsSource {
    fn fetch_points(&self) -> Result<Vec<RawPoint>, FeedError> {
        let body = fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_points(&body)
    }

    fn describe(&self) -> String {
        self.path.clone()
    }
}

/// HTTP for `http://`/`https://` locations, the filesystem otherwise.
pub fn points_source_for(location: &str) -> Box<dyn PointsSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpPointsSource::new(location))
    } else {
        Box::new(FilePointsSource::new(location))
    }
}
