//! Notification surface port.
//!
//! A surface is whatever the notification is drawn on: an HTML page
//! document, a terminal, a test recorder. Calls are synchronous and must not
//! block; element lookups are by id.

use crate::domain::{NotificationView, UpdateControl};

/// Port for drawing and removing the update notification.
pub trait NotificationSurface: Send + Sync {
    /// Insert a view as the first element of the document, initially hidden.
    fn insert_at_top(&self, view: &NotificationView);

    /// Remove the element with this id. Returns whether one was removed.
    fn remove(&self, element_id: &str) -> bool;

    /// Whether an element with this id is present.
    fn contains(&self, element_id: &str) -> bool;

    /// Show or hide an element. Missing elements are ignored.
    fn set_visible(&self, element_id: &str, visible: bool);

    /// Reflect the state of the "update now" control.
    fn set_update_control(&self, element_id: &str, control: UpdateControl);

    /// Whether a stylesheet with this marker id has been injected.
    fn has_stylesheet(&self, marker_id: &str) -> bool;

    /// Inject a stylesheet block under a marker id.
    fn inject_stylesheet(&self, marker_id: &str, css: &str);
}
