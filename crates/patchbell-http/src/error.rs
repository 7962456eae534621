//! Internal error types for update endpoint calls.
//!
//! These errors are internal to `patchbell-http` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for update endpoint calls.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors from talking to the update backend.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend answered with an error status and a body that is not
    /// the expected JSON.
    #[error("Update API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
