//! Core of the patchbell update notifier.
//!
//! This crate holds everything that does not touch the network, the disk or
//! a terminal: domain types, the ports those concerns are reached through,
//! the changelog formatter, HTML rendering, the dismissal store, the
//! [`UpdateNotifier`] service and its [`PollScheduler`].
//!
//! Adapters live in sibling crates and are wired together by the binary.

#![deny(unused_crate_dependencies)]

pub mod changelog;
pub mod config;
pub mod dismissal;
pub mod document;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod render;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use changelog::{
    ChangelogBlock, HeadingLevel, Inline, blocks_to_html, changelog_to_html, format_changelog,
    inlines_to_plain,
};
pub use config::{ConfigError, DEFAULT_POLL_INTERVAL, NotifierConfig};
pub use dismissal::{DISMISSED_UPDATES_KEY, DismissalStore, DismissedVersionSet};
pub use document::{Element, PageDocument};
pub use domain::{
    ApplyResponse, CheckResponse, NOTIFICATION_ELEMENT_ID, NotificationPhase, NotificationView,
    STYLESHEET_MARKER_ID, UpdateControl, UpdateInfo, compare_versions, extract_version,
};
pub use error::CoreError;
pub use events::NotifierEvent;
pub use ports::{
    ApiError, KeyValueStore, NoopEmitter, NotificationSurface, NotifierEventEmitter,
    PageLifecycle, StorageError, UpdateApiPort, UserPrompt,
};
pub use render::{NOTIFICATION_STYLESHEET, render_view_html};
pub use services::{
    CheckOutcome, NotifierDeps, NotifierStatus, PollScheduler, SchedulerHandle, UpdateNotifier,
    UpdateOutcome, Visibility, VisibilitySignal,
};
