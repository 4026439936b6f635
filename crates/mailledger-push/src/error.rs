//! Error types for the push notification library.
//!
//! Event parsing itself never fails; these errors only come from decoding
//! records off the wire and loading configuration.

use thiserror::Error;

/// Errors that can occur while decoding notification input.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
