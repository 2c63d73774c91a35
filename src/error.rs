//! Error types for docrelay.
//!
//! "Not found" is never an error in this crate. Lookups that find nothing
//! return `Ok(None)`. `RelayError` covers actual faults: broken config,
//! unreadable directory files, bad signing keys, IO.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Top-level error type for the docrelay library.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration is missing or malformed.
    #[error("Config error: {0}")]
    Config(String),

    /// The recipient directory could not be read or parsed.
    #[error("Directory error: {0}")]
    Directory(String),

    /// Signing key material is unusable.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Underlying IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
