//! Core error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::ports::{ApiError, StorageError};

/// Errors surfaced by core services.
///
/// The notifier itself swallows check failures (they are logged and
/// retried on the next tick); this type covers construction and the
/// operations whose callers need to know about persistence problems.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
