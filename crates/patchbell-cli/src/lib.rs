//! Command-line front end for the patchbell update notifier.
//!
//! The binary in `main.rs` parses arguments, composes adapters in
//! [`bootstrap`] and hands off to a handler per command.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

// Used by main.rs only
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, DismissedCommand};
pub use error::CliError;
pub use parser::Cli;
