#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultUpdateClient is meant to be used through the UpdateApiPort trait,
// not its internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultUpdateClient;

// Configuration
pub use config::{DEFAULT_BASE_URL, UpdateClientConfig};

// Silence unused dev-dependency warnings; axum is only used by tests/
#[cfg(test)]
use axum as _;
