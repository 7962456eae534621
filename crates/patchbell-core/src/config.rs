//! Notifier configuration.

use std::time::Duration;

use thiserror::Error;

use crate::dismissal::DISMISSED_UPDATES_KEY;

/// Default time between scheduled checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Configuration for the update notifier.
///
/// Use the builder pattern methods to customize the configuration.
///
/// # Example
///
/// ```
/// use patchbell_core::NotifierConfig;
/// use std::time::Duration;
///
/// let config = NotifierConfig::new()
///     .with_admin(true)
///     .with_poll_interval(Duration::from_secs(60));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// Time between scheduled checks
    pub poll_interval: Duration,
    /// Delay between inserting a view and making it visible
    pub show_delay: Duration,
    /// Delay between hiding a dismissed view and removing it
    pub hide_delay: Duration,
    /// Delay between a successful update and the reload
    pub reload_delay: Duration,
    /// Whether the user may trigger an update
    pub is_admin: bool,
    /// Storage key for the dismissed-version set
    pub storage_key: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            show_delay: Duration::from_millis(100),
            hide_delay: Duration::from_millis(300),
            reload_delay: Duration::from_secs(2),
            is_admin: false,
            storage_key: DISMISSED_UPDATES_KEY.to_string(),
        }
    }
}

impl NotifierConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scheduled check interval.
    ///
    /// Defaults to 5 minutes.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the show, hide and reload delays at once.
    #[must_use]
    pub const fn with_delays(mut self, show: Duration, hide: Duration, reload: Duration) -> Self {
        self.show_delay = show;
        self.hide_delay = hide;
        self.reload_delay = reload;
        self
    }

    /// Grant or withhold the right to trigger updates.
    #[must_use]
    pub const fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    /// Set the storage key for dismissed versions.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Check the configuration for values the notifier cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("Storage key must not be empty")]
    EmptyStorageKey,
}
