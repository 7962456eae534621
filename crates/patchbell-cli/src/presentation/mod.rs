//! Terminal adapters for the notifier ports.
//!
//! The terminal stands in for the page: [`TerminalSurface`] draws the
//! notification, [`TerminalPrompt`] asks questions on stdin,
//! [`ReloadSignal`] records reload requests and [`LogEmitter`] forwards
//! events to the log.
//!
//! # Guidelines
//!
//! - Keep this module format-only: no notifier decisions
//! - Pure line builders are separate from the writers so they can be tested

pub mod banner;
pub mod events;
pub mod page;
pub mod prompt;
pub mod surface;

pub use banner::{banner_lines, changelog_lines, control_line};
pub use events::LogEmitter;
pub use page::ReloadSignal;
pub use prompt::{LineReceiver, TerminalPrompt, is_yes, spawn_stdin_reader};
pub use surface::TerminalSurface;
