//! Error types for the jolt_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jolt_core operations
///
/// The pure queries (decay, aggregation, classification) never fail; these
/// variants cover the configuration, catalog and event-store layers around them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// An event referenced a substance the catalog does not know
    #[error("Unknown substance: {0}")]
    UnknownSubstance(String),

    /// An event was rejected before it reached the log
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}
