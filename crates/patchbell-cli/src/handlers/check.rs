//! Check command handler.
//!
//! Runs one update check against the backend and prints what the notifier
//! would decide, without drawing anything.

use std::cmp::Ordering;

use console::style;
use patchbell_core::{NotifierConfig, compare_versions, format_changelog};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::changelog_lines;

/// Execute the check command.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let response = ctx.api.check_update().await?;

    if !response.success {
        let reason = response.error.as_deref().unwrap_or("no reason given");
        println!("Backend could not determine updates: {reason}");
        return Ok(());
    }

    println!("Current version: {}", response.current_version);
    if let Some(latest) = &response.latest_version {
        println!("Latest version:  {latest}");
    }

    let Some(info) = response.into_update_info() else {
        println!("{}", style("Up to date.").green());
        return Ok(());
    };

    if compare_versions(&info.current_version, &info.latest_version) != Ordering::Less {
        println!(
            "{}",
            style("Warning: the announced version is not newer than the current one").yellow()
        );
    }

    let dismissals = ctx.dismissals(&NotifierConfig::new());
    if dismissals.is_dismissed(&info.latest_version) {
        println!(
            "Update {} is available but was dismissed; no notification will be shown.",
            info.latest_version
        );
    } else {
        println!(
            "{}",
            style(format!("Update {} available.", info.latest_version))
                .bold()
                .cyan()
        );
    }

    let blocks = info
        .changelog
        .as_deref()
        .map(format_changelog)
        .unwrap_or_default();
    if !blocks.is_empty() {
        println!();
        println!("What's new?");
        for line in changelog_lines(&blocks) {
            println!("  {line}");
        }
    }
    Ok(())
}
