//! Storage adapter errors.

use std::path::PathBuf;

use patchbell_core::StorageError;
use thiserror::Error;

/// Errors raised while opening or writing a storage file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to read the storage file.
    #[error("Failed to read storage file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Failed to write the storage file.
    #[error("Failed to write storage file {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// Values could not be encoded.
    #[error("Failed to encode storage file {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

impl From<StoreError> for StorageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Encode { .. } => Self::Serialization {
                message: err.to_string(),
            },
            StoreError::NoDataDir | StoreError::Read { .. } | StoreError::Write { .. } => {
                Self::Io {
                    message: err.to_string(),
                }
            }
        }
    }
}
