//! Key-value storage adapters for patchbell.
//!
//! [`FileStore`] plays the part of browser local storage for the CLI: a
//! single JSON object file mapping keys to string values.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod error;
mod file;
mod paths;

pub use error::StoreError;
pub use file::FileStore;
pub use paths::{STORAGE_DIR_ENV, default_storage_path};
