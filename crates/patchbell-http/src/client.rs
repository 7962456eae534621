//! Update client for the check and apply endpoints.

use patchbell_core::{ApplyResponse, CheckResponse};
use tracing::debug;
use url::Url;

use crate::config::UpdateClientConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::build_endpoint_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default update client using the reqwest HTTP backend.
pub type DefaultUpdateClient = UpdateClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the update backend.
///
/// Generic over an HTTP backend so tests can swap in a fake. Use
/// `DefaultUpdateClient` for production code.
pub struct UpdateClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) check_url: Url,
    pub(crate) apply_url: Url,
}

impl DefaultUpdateClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(config: &UpdateClientConfig) -> Result<Self, patchbell_core::ApiError> {
        Self::build(config).map_err(crate::port::map_error)
    }

    fn build(config: &UpdateClientConfig) -> HttpResult<Self> {
        let base = Url::parse(&config.base_url)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::with_backend(&base, config, backend))
    }
}

impl<B: HttpBackend> UpdateClient<B> {
    /// Create a client over a custom backend.
    pub(crate) fn with_backend(base: &Url, config: &UpdateClientConfig, backend: B) -> Self {
        Self {
            backend,
            check_url: build_endpoint_url(base, &config.check_path),
            apply_url: build_endpoint_url(base, &config.apply_path),
        }
    }

    /// Ask whether an update is available.
    pub async fn check(&self) -> HttpResult<CheckResponse> {
        debug!(url = %self.check_url, "Checking for updates");
        self.backend.get_json(&self.check_url).await
    }

    /// Ask the backend to apply the latest update.
    pub async fn apply(&self) -> HttpResult<ApplyResponse> {
        debug!(url = %self.apply_url, "Requesting update application");
        self.backend.post_json(&self.apply_url).await
    }
}
