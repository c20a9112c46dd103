//! Error types for the fallible surface of the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the platform position query.
///
/// The `Display` text is exactly what the location service stores for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("Location access denied by user")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Geolocation is not supported on this platform")]
    Unsupported,

    /// Any provider failure outside the three classified causes.
    #[error("Unable to retrieve location")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    /// Timer and delayed handoffs need a Tokio runtime on the calling thread.
    #[error("no async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Well-formed config whose seed data breaks a model rule.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
