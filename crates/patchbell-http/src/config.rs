//! Public configuration for the update client.

use std::time::Duration;

/// Default location of the update backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Configuration for the update client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use patchbell_http::UpdateClientConfig;
/// use std::time::Duration;
///
/// let config = UpdateClientConfig::new()
///     .with_base_url("https://dashboard.example.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct UpdateClientConfig {
    /// Base URL the endpoint paths are appended to
    pub(crate) base_url: String,
    /// Path of the check endpoint
    pub(crate) check_path: String,
    /// Path of the apply endpoint
    pub(crate) apply_path: String,
    /// Request timeout; `None` leaves it to the transport
    pub(crate) timeout: Option<Duration>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
}

impl Default for UpdateClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            check_path: "/api/check-update".to_string(),
            apply_path: "/api/update-application".to_string(),
            timeout: None,
            user_agent: concat!("patchbell/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl UpdateClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the backend.
    ///
    /// Defaults to `http://127.0.0.1:5000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the check endpoint path.
    #[must_use]
    pub fn with_check_path(mut self, path: impl Into<String>) -> Self {
        self.check_path = path.into();
        self
    }

    /// Override the apply endpoint path.
    #[must_use]
    pub fn with_apply_path(mut self, path: impl Into<String>) -> Self {
        self.apply_path = path.into();
        self
    }

    /// Set a request timeout.
    ///
    /// No timeout is applied by default.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
