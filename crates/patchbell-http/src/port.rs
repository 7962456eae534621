//! Port trait implementation for `UpdateClient`.
//!
//! This module implements the core-owned `UpdateApiPort` trait for
//! `UpdateClient`, mapping internal errors to core port errors.

use async_trait::async_trait;
use patchbell_core::{ApiError, ApplyResponse, CheckResponse, UpdateApiPort};

use crate::client::UpdateClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `HttpError` to core `ApiError`.
pub(crate) fn map_error(err: HttpError) -> ApiError {
    match err {
        HttpError::ApiRequestFailed { status, url } => ApiError::Status { status, url },
        HttpError::Network(e) if e.is_decode() => ApiError::InvalidResponse {
            message: e.to_string(),
        },
        HttpError::Network(e) if e.is_builder() => ApiError::Configuration {
            message: e.to_string(),
        },
        HttpError::Network(e) => ApiError::Network {
            message: e.to_string(),
        },
        HttpError::InvalidUrl(e) => ApiError::Configuration {
            message: e.to_string(),
        },
        HttpError::JsonParse(e) => ApiError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> UpdateApiPort for UpdateClient<B> {
    async fn check_update(&self) -> Result<CheckResponse, ApiError> {
        self.check().await.map_err(map_error)
    }

    async fn apply_update(&self) -> Result<ApplyResponse, ApiError> {
        self.apply().await.map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_status() {
        let err = HttpError::ApiRequestFailed {
            status: 502,
            url: "http://127.0.0.1:5000/api/check-update".to_string(),
        };
        assert_eq!(
            map_error(err),
            ApiError::Status {
                status: 502,
                url: "http://127.0.0.1:5000/api/check-update".to_string(),
            }
        );
    }

    #[test]
    fn test_map_error_json() {
        let parse_error = serde_json::from_str::<CheckResponse>("{").unwrap_err();
        assert!(matches!(
            map_error(HttpError::JsonParse(parse_error)),
            ApiError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn test_map_error_url() {
        let url_error = url::Url::parse("::").unwrap_err();
        assert!(matches!(
            map_error(HttpError::InvalidUrl(url_error)),
            ApiError::Configuration { .. }
        ));
    }
}
