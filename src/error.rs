//! Error types for the dossier tool.

use dossier_gather::GatherError;

/// Top-level error type for configuration, gathering setup and output.
#[derive(Debug, thiserror::Error)]
pub enum DossierError {
    /// Missing or invalid configuration. Fatal before any gathering starts.
    #[error("config error: {0}")]
    Config(String),

    /// The gather pipeline could not be constructed.
    #[error("gather error: {0}")]
    Gather(#[from] GatherError),

    /// Serialising outcomes failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DossierError>;
