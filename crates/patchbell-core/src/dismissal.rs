//! Dismissed-version tracking.
//!
//! The set is loaded from storage once, when the store is created, and
//! written back in full every time a new version is added.

use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ports::{KeyValueStore, StorageError};

/// Storage key the dismissed-version set lives under.
pub const DISMISSED_UPDATES_KEY: &str = "dismissedUpdates";

/// Versions the user asked not to be notified about again.
///
/// Serialized as a JSON array in dismissal order. Duplicate entries in
/// stored data collapse on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DismissedVersionSet(IndexSet<String>);

impl DismissedVersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.0.contains(version)
    }

    /// Add a version. Returns `false` if it was already present.
    pub fn insert(&mut self, version: impl Into<String>) -> bool {
        self.0.insert(version.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })
    }
}

/// Persistent dismissed-version store backed by a [`KeyValueStore`].
pub struct DismissalStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    versions: Mutex<DismissedVersionSet>,
}

impl DismissalStore {
    /// Load the set stored under `key`.
    ///
    /// An absent key yields an empty set. Unreadable or corrupt data is
    /// logged and also yields an empty set; the next dismissal overwrites it.
    pub fn load(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let versions = match storage.get(&key) {
            Ok(Some(json)) => DismissedVersionSet::from_json(&json).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "Ignoring unreadable dismissed-version data");
                DismissedVersionSet::new()
            }),
            Ok(None) => DismissedVersionSet::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read dismissed versions");
                DismissedVersionSet::new()
            }
        };
        debug!(key = %key, count = versions.len(), "Loaded dismissed versions");

        Self {
            storage,
            key,
            versions: Mutex::new(versions),
        }
    }

    pub fn is_dismissed(&self, version: &str) -> bool {
        self.lock().contains(version)
    }

    /// Mark a version as dismissed and persist the whole set.
    ///
    /// Returns `Ok(false)` without writing if the version was already
    /// dismissed. On a write failure the version stays dismissed in memory
    /// for the lifetime of this store.
    pub fn dismiss(&self, version: &str) -> Result<bool, StorageError> {
        let json = {
            let mut versions = self.lock();
            if !versions.insert(version) {
                return Ok(false);
            }
            versions.to_json()?
        };
        self.storage.set(&self.key, &json)?;
        debug!(version = %version, "Dismissed version persisted");
        Ok(true)
    }

    /// Snapshot of dismissed versions in dismissal order.
    pub fn versions(&self) -> Vec<String> {
        self.lock().iter().map(str::to_string).collect()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DismissedVersionSet> {
        self.versions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    fn store_with(storage: &Arc<MemoryStore>) -> DismissalStore {
        DismissalStore::load(storage.clone(), DISMISSED_UPDATES_KEY)
    }

    #[test]
    fn test_absent_key_is_empty() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(&storage);
        assert!(store.versions().is_empty());
        assert!(!store.is_dismissed("1.0.0"));
    }

    #[test]
    fn test_dismiss_then_is_dismissed() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(&storage);

        assert!(store.dismiss("1.2.0").unwrap());
        assert!(store.is_dismissed("1.2.0"));
        assert!(!store.is_dismissed("1.3.0"));
    }

    #[test]
    fn test_dismissal_survives_reload() {
        let storage = Arc::new(MemoryStore::new());
        store_with(&storage).dismiss("1.2.0").unwrap();

        let reloaded = store_with(&storage);
        assert!(reloaded.is_dismissed("1.2.0"));
    }

    #[test]
    fn test_persisted_as_json_array() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(&storage);
        store.dismiss("1.0.0").unwrap();
        store.dismiss("1.1.0").unwrap();

        assert_eq!(
            storage.get(DISMISSED_UPDATES_KEY).unwrap().as_deref(),
            Some(r#"["1.0.0","1.1.0"]"#)
        );
    }

    #[test]
    fn test_duplicate_dismiss_is_noop() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(&storage);
        assert!(store.dismiss("1.0.0").unwrap());
        assert!(!store.dismiss("1.0.0").unwrap());

        assert_eq!(store.versions(), vec!["1.0.0".to_string()]);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_stored_duplicates_collapse() {
        let storage = Arc::new(MemoryStore::new());
        storage
            .set(DISMISSED_UPDATES_KEY, r#"["1.0.0","1.0.0","0.9.0"]"#)
            .unwrap();

        let store = store_with(&storage);
        assert_eq!(
            store.versions(),
            vec!["1.0.0".to_string(), "0.9.0".to_string()]
        );
    }

    #[test]
    fn test_corrupt_data_treated_as_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(DISMISSED_UPDATES_KEY, "{not json").unwrap();

        let store = store_with(&storage);
        assert!(store.versions().is_empty());

        store.dismiss("2.0.0").unwrap();
        assert_eq!(
            storage.get(DISMISSED_UPDATES_KEY).unwrap().as_deref(),
            Some(r#"["2.0.0"]"#)
        );
    }

    #[test]
    fn test_write_failure_keeps_version_in_memory() {
        let storage = Arc::new(MemoryStore::new());
        let store = store_with(&storage);
        storage.fail_writes(true);

        assert!(store.dismiss("1.0.0").is_err());
        assert!(store.is_dismissed("1.0.0"));
    }
}
