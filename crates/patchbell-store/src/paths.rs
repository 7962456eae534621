//! Default storage location.

use std::env;
use std::path::PathBuf;

use crate::error::StoreError;

/// Environment variable overriding the data directory.
pub const STORAGE_DIR_ENV: &str = "PATCHBELL_DATA_DIR";

const STORAGE_FILE_NAME: &str = "storage.json";

/// Path of the storage file when none is configured.
///
/// Resolution order:
/// 1. `PATCHBELL_DATA_DIR` environment variable
/// 2. `<system local data dir>/patchbell`
///
/// The directory is created on first write, not here.
pub fn default_storage_path() -> Result<PathBuf, StoreError> {
    if let Ok(dir) = env::var(STORAGE_DIR_ENV) {
        return Ok(PathBuf::from(dir).join(STORAGE_FILE_NAME));
    }

    let data_dir = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
    Ok(data_dir.join("patchbell").join(STORAGE_FILE_NAME))
}
