//! Commands enum and subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Watch the backend for updates and show notifications in the terminal
    Watch {
        /// Allow triggering updates from the notification
        #[arg(long)]
        admin: bool,
        /// Seconds between scheduled checks
        #[arg(long, value_name = "SECS", default_value_t = 300)]
        interval: u64,
    },

    /// Run a single update check and print the result
    Check,

    /// Inspect or edit dismissed versions
    Dismissed {
        #[command(subcommand)]
        command: DismissedCommand,
    },

    /// Print a changelog formatted as HTML
    Changelog {
        /// Changelog file, or "-" for stdin
        input: PathBuf,
    },

    /// Render an HTML page containing an update notification
    Preview {
        /// Installed version
        #[arg(long)]
        current: String,
        /// Version being announced
        #[arg(long)]
        latest: String,
        /// Changelog file to include
        #[arg(long)]
        changelog: Option<PathBuf>,
        /// Render the "Update now" control as enabled
        #[arg(long)]
        admin: bool,
        /// Write the page here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Dismissed-version subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum DismissedCommand {
    /// List dismissed versions in dismissal order
    List,
    /// Dismiss a version without waiting for a notification
    Add {
        /// Version to dismiss
        version: String,
    },
}
