//! Domain types for update notifications.
//!
//! Pure data with no infrastructure dependencies.

mod update;
mod version;
mod view;

pub use update::{ApplyResponse, CheckResponse, UpdateInfo};
pub use version::{compare_versions, extract_version};
pub use view::{
    NOTIFICATION_ELEMENT_ID, NotificationPhase, NotificationView, STYLESHEET_MARKER_ID,
    UpdateControl,
};
