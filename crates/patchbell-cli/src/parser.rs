//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use patchbell_http::DEFAULT_BASE_URL;

use crate::commands::Commands;

/// Command-line interface for the update notifier.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "patchbell")]
#[command(about = "Watch a dashboard backend for updates and apply them")]
#[command(version)]
pub struct Cli {
    /// Base URL of the update backend
    #[arg(long = "base-url", env = "PATCHBELL_BASE_URL", global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Storage file for dismissed versions (defaults to the platform data dir)
    #[arg(long = "storage", env = "PATCHBELL_STORAGE", global = true)]
    pub storage: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "patchbell",
            "--verbose",
            "--base-url",
            "http://dash.local:8080",
            "--storage",
            "/tmp/pb.json",
            "check",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url, "http://dash.local:8080");
        assert_eq!(cli.storage, Some(PathBuf::from("/tmp/pb.json")));
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["patchbell", "dismissed", "list", "--storage", "/tmp/x.json"]);
        assert_eq!(cli.storage, Some(PathBuf::from("/tmp/x.json")));
    }
}
