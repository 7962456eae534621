//! The notification view model.

use serde::{Deserialize, Serialize};

use super::update::UpdateInfo;
use crate::changelog::{ChangelogBlock, format_changelog};

/// Fixed element id of the single live notification.
pub const NOTIFICATION_ELEMENT_ID: &str = "update-notification-container";

/// Marker id of the shared notification stylesheet.
pub const STYLESHEET_MARKER_ID: &str = "update-notification-styles";

/// State of the "update now" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateControl {
    /// Whether the control accepts clicks.
    pub enabled: bool,
    /// Whether an update-apply request is in flight.
    pub busy: bool,
}

impl UpdateControl {
    /// Idle control, enabled only for privileged users.
    pub const fn idle(is_admin: bool) -> Self {
        Self {
            enabled: is_admin,
            busy: false,
        }
    }

    /// Control while an update-apply request is running.
    pub const fn busy() -> Self {
        Self {
            enabled: false,
            busy: true,
        }
    }

    /// Label shown on the control.
    pub const fn label(&self) -> &'static str {
        if self.busy { "Updating…" } else { "Update now" }
    }
}

/// Everything a surface needs to draw the update notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationView {
    pub element_id: String,
    pub current_version: String,
    pub latest_version: String,
    pub changelog: Vec<ChangelogBlock>,
    pub update_control: UpdateControl,
}

impl NotificationView {
    /// Build the view for an update candidate.
    pub fn build(info: &UpdateInfo, is_admin: bool) -> Self {
        let changelog = info
            .changelog
            .as_deref()
            .map(format_changelog)
            .unwrap_or_default();

        Self {
            element_id: NOTIFICATION_ELEMENT_ID.to_string(),
            current_version: info.current_version.clone(),
            latest_version: info.latest_version.clone(),
            changelog,
            update_control: UpdateControl::idle(is_admin),
        }
    }

    pub fn title(&self) -> String {
        format!("Update {} available", self.latest_version)
    }

    /// Whether the collapsible changelog section is drawn.
    pub fn has_changelog(&self) -> bool {
        !self.changelog.is_empty()
    }
}

/// Where the current candidate stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPhase {
    Unseen,
    Shown,
    Dismissed,
    UpdateTriggered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_view_with_changelog() {
        let info = UpdateInfo::new("1.0.0", "1.1.0").with_changelog("## 1.1.0\n- fix");
        let view = NotificationView::build(&info, true);

        assert_eq!(view.element_id, NOTIFICATION_ELEMENT_ID);
        assert_eq!(view.title(), "Update 1.1.0 available");
        assert!(view.has_changelog());
        assert!(view.update_control.enabled);
    }

    #[test]
    fn test_build_view_without_changelog() {
        let info = UpdateInfo::new("1.0.0", "1.1.0").with_changelog("   ");
        let view = NotificationView::build(&info, false);

        assert!(!view.has_changelog());
        assert!(!view.update_control.enabled);
    }

    #[test]
    fn test_update_control_labels() {
        assert_eq!(UpdateControl::idle(true).label(), "Update now");
        assert_eq!(UpdateControl::busy().label(), "Updating…");
        assert!(!UpdateControl::busy().enabled);
    }
}
