//! Internal error types for patron-cloudinary.

use thiserror::Error;

/// Result type alias for patron-cloudinary operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for patron-cloudinary operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The upload API answered with a non-success status.
    #[error("Upload API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl Error {
    /// Returns whether this error was caused by a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Reqwest(e) if e.is_timeout())
    }
}
