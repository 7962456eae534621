//! Client-local key-value storage port.
//!
//! Mirrors the shape of browser local storage: string keys, string values,
//! synchronous access.

use thiserror::Error;

/// Errors from key-value storage backends.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage I/O error: {message}")]
    Io { message: String },

    #[error("Stored data could not be (de)serialized: {message}")]
    Serialization { message: String },
}

/// Port for persisting small string values under fixed keys.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Absent keys return `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
