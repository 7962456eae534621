//! Notifier events.
//!
//! Events are serialized with a `type` tag so UI bridges can forward them
//! unchanged:
//!
//! ```json
//! { "type": "notification_shown", "version": "1.2.0" }
//! ```

use serde::{Deserialize, Serialize};

/// Lifecycle events emitted by the update notifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotifierEvent {
    /// A scheduled or manual check could not reach or decode the backend.
    CheckFailed { error: String },

    /// A notification for this version is now on the surface.
    NotificationShown { version: String },

    /// The user dismissed this version.
    NotificationDismissed { version: String },

    /// The user confirmed the update and the apply request was sent.
    UpdateStarted,

    /// The backend applied the update; a reload follows.
    UpdateApplied { message: Option<String> },

    /// The apply request failed; the control is usable again.
    UpdateFailed { reason: String },
}

impl NotifierEvent {
    pub fn notification_shown(version: impl Into<String>) -> Self {
        Self::NotificationShown {
            version: version.into(),
        }
    }

    pub fn notification_dismissed(version: impl Into<String>) -> Self {
        Self::NotificationDismissed {
            version: version.into(),
        }
    }

    /// Short name of the event, matching its serialized `type` tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CheckFailed { .. } => "check_failed",
            Self::NotificationShown { .. } => "notification_shown",
            Self::NotificationDismissed { .. } => "notification_dismissed",
            Self::UpdateStarted => "update_started",
            Self::UpdateApplied { .. } => "update_applied",
            Self::UpdateFailed { .. } => "update_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(NotifierEvent::notification_shown("1.2.0")).unwrap();
        assert_eq!(json["type"], "notification_shown");
        assert_eq!(json["version"], "1.2.0");
    }

    #[test]
    fn test_name_matches_tag() {
        let events = [
            NotifierEvent::CheckFailed {
                error: "offline".to_string(),
            },
            NotifierEvent::notification_dismissed("1.0.0"),
            NotifierEvent::UpdateStarted,
            NotifierEvent::UpdateApplied { message: None },
            NotifierEvent::UpdateFailed {
                reason: "denied".to_string(),
            },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.name());
        }
    }
}
