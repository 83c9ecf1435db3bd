//! Error types for the points feed and the rendering backend.

use thiserror::Error;

/// Reasons a points feed could not be read.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("points feed is not a JSON array of points: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The rendering backend could not provide a surface.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("rendering backend unavailable: {0}")]
    Unavailable(String),

    #[error("map container `{0}` not found")]
    ContainerMissing(String),
}
