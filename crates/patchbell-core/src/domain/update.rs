//! Wire and domain types for the update-check and update-apply endpoints.

use serde::{Deserialize, Serialize};

use super::version::extract_version;

/// Body returned by `GET /api/check-update`.
///
/// Every field except `success` is optional on the wire; a failed check on
/// the backend side usually only carries `success: false` and an `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Whether the backend managed to determine update availability.
    pub success: bool,

    /// Whether a newer version exists.
    #[serde(default)]
    pub update_available: bool,

    /// Version currently installed on the backend.
    #[serde(default)]
    pub current_version: String,

    /// Latest published version.
    #[serde(default, rename = "github_version")]
    pub latest_version: Option<String>,

    /// Release notes for the latest version.
    #[serde(default)]
    pub changelog: Option<String>,

    /// Backend-provided failure description.
    #[serde(default)]
    pub error: Option<String>,
}

impl CheckResponse {
    /// Extract the update candidate, if this response announces one.
    ///
    /// Returns `None` when the check failed, no update is available, or the
    /// backend did not report a latest version. A release label such as
    /// `v1.2.0` or `Release v1.2.0` is reduced to its `1.2.0` version.
    pub fn into_update_info(self) -> Option<UpdateInfo> {
        if !self.success || !self.update_available {
            return None;
        }
        let latest_version = self
            .latest_version
            .as_deref()
            .map(normalise_version)
            .filter(|v| !v.is_empty())?;
        Some(UpdateInfo {
            update_available: true,
            current_version: self.current_version,
            latest_version,
            changelog: self.changelog,
        })
    }
}

/// Strip a release label down to its version. Anything after the version
/// (a pre-release suffix, say) keeps the label as it is.
fn normalise_version(label: &str) -> String {
    let label = label.trim();
    match extract_version(label) {
        Some(version) if label.ends_with(&version) => version,
        _ => label.to_string(),
    }
}

/// An update candidate announced by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub update_available: bool,
    pub current_version: String,
    pub latest_version: String,
    pub changelog: Option<String>,
}

impl UpdateInfo {
    /// Build an announced update.
    pub fn new(current_version: impl Into<String>, latest_version: impl Into<String>) -> Self {
        Self {
            update_available: true,
            current_version: current_version.into(),
            latest_version: latest_version.into(),
            changelog: None,
        }
    }

    /// Attach release notes.
    #[must_use]
    pub fn with_changelog(mut self, changelog: impl Into<String>) -> Self {
        self.changelog = Some(changelog.into());
        self
    }
}

/// Body returned by `POST /api/update-application`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApplyResponse {
    /// Human-readable reason for a failed apply.
    ///
    /// Prefers `message`, falls back to `error`.
    pub fn failure_reason(&self) -> String {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("unknown error")
            .to_string()
    }
}
