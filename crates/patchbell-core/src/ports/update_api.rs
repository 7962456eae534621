//! Update API port definition.
//!
//! This port defines the two backend calls the notifier makes. Implementations
//! handle transport details (HTTP client, base URL, serialization).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ApplyResponse, CheckResponse};

/// Errors surfaced by update API implementations.
///
/// These are transport-level failures. A well-formed response with
/// `success: false` is not an error; it is returned as a response value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Could not reach the backend.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with an error status and no usable body.
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// The backend answered with a body that could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The client was misconfigured (bad base URL, etc.).
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Port for the backend update endpoints.
///
/// # Design Rules
///
/// - No HTTP client types in signatures
/// - Works with domain response types directly
/// - One attempt per call; retries are not part of the contract
#[async_trait]
pub trait UpdateApiPort: Send + Sync {
    /// Ask the backend whether an update is available.
    async fn check_update(&self) -> Result<CheckResponse, ApiError>;

    /// Ask the backend to apply the latest update.
    async fn apply_update(&self) -> Result<ApplyResponse, ApiError>;
}
