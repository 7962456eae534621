//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the notifier expects from its
//! environment: the backend, local storage, the page it draws on, and the
//! user. They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No HTTP client or filesystem types in any signature
//! - Surface and storage calls are synchronous, like the DOM and local storage they model
//! - Network and dialog calls are async

pub mod event_emitter;
pub mod interaction;
pub mod page;
pub mod storage;
pub mod surface;
pub mod update_api;

pub use event_emitter::{NoopEmitter, NotifierEventEmitter};
pub use interaction::UserPrompt;
pub use page::PageLifecycle;
pub use storage::{KeyValueStore, StorageError};
pub use surface::NotificationSurface;
pub use update_api::{ApiError, UpdateApiPort};

#[cfg(test)]
pub use interaction::MockUserPrompt;
#[cfg(test)]
pub use page::MockPageLifecycle;
