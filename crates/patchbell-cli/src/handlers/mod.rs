//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//!   (commands without backend or storage needs skip the context)
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core services
//!   3. Format output for the terminal
//!
//! Handlers should NOT make notifier decisions themselves.

pub mod changelog;
pub mod check;
pub mod dismissed;
pub mod preview;
pub mod watch;

use std::io::Read;
use std::path::Path;

use crate::error::CliError;

/// Read a text file, or stdin when the path is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))
}
