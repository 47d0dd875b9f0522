//! Error types shared by the activity loader, the chart adapter and preference storage.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while fetching or decoding the activity feed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("activity payload is not a JSON list: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure reported by the host-side chart object.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("cannot serialise chart config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("chart bridge: {0}")]
    Bridge(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference storage unavailable")]
    Unavailable,

    #[error("cannot write preferences to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Top-level error for the statistics widget.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

pub type Result<T, E = StatsError> = std::result::Result<T, E>;
