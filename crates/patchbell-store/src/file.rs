//! JSON-file key-value store.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use patchbell_core::{KeyValueStore, StorageError};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Key-value store persisted as one JSON object file.
///
/// The file is read once, at open. Every `set` rewrites the whole file
/// through a temporary sibling and a rename, so a crash never leaves a
/// half-written file behind.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. A file that is not a JSON object
    /// of strings is logged and treated as empty; it is replaced on the
    /// next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => parse_values(&path, &contents),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Read {
                    path,
                    reason: e.to_string(),
                });
            }
        };
        debug!(path = %path.display(), keys = values.len(), "Opened storage file");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(values).map_err(|e| StoreError::Encode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let write_error = |e: std::io::Error| StoreError::Write {
            path: self.path.clone(),
            reason: e.to_string(),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(write_error)?;
        fs::rename(&tmp_path, &self.path).map_err(write_error)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_values(path: &Path, contents: &str) -> BTreeMap<String, String> {
    if contents.trim().is_empty() {
        return BTreeMap::new();
    }
    serde_json::from_str(contents).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring unreadable storage file");
        BTreeMap::new()
    })
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    /// Write a value and flush the whole file.
    ///
    /// The guard is held across the write so concurrent setters cannot
    /// reorder file contents. On failure the new value stays in memory.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.lock();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values).map_err(StorageError::from)
    }
}
