//! Error types for the newsdeck console
//!
//! This module provides structured error handling using thiserror for
//! error definitions and anyhow for propagation at the binary boundary.

use thiserror::Error;

/// Main error type for console operations
#[derive(Error, Debug)]
pub enum DeckError {
    /// Transport-level HTTP failure (connect, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status code
    #[error("Backend rejected {endpoint}: {status}")]
    Backend {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// Response body did not match the expected shape
    #[error("Malformed response from {endpoint}: {detail}")]
    MalformedResponse { endpoint: String, detail: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation not valid in the current surface state
    /// (e.g. saving a settings form that is not open)
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, DeckError>;

/// Convert anyhow::Error to DeckError
impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::Other(err.to_string())
    }
}
