//! Watch command handler.
//!
//! Runs the notifier against the backend until the user quits. The terminal
//! plays the page: keys typed on stdin stand in for the notification's
//! buttons, and a successful update "reloads" by rebuilding the notifier.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use console::style;
use patchbell_core::{
    NotifierConfig, NotifierStatus, PollScheduler, UpdateOutcome, Visibility, VisibilitySignal,
};
use tracing::{debug, info, warn};

use crate::bootstrap::{CliContext, Frontend};
use crate::error::CliError;
use crate::presentation::{
    LineReceiver, LogEmitter, ReloadSignal, TerminalPrompt, TerminalSurface, spawn_stdin_reader,
};

/// A key typed while watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKey {
    Update,
    Dismiss,
    Recheck,
    Status,
    Help,
    Quit,
    Unknown,
}

impl WatchKey {
    /// Parse one input line. Blank lines are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let key = match line.trim().to_lowercase().as_str() {
            "" => return None,
            "u" | "update" => Self::Update,
            "d" | "dismiss" | "later" => Self::Dismiss,
            "r" | "recheck" => Self::Recheck,
            "s" | "status" => Self::Status,
            "h" | "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown,
        };
        Some(key)
    }
}

enum SessionEnd {
    Quit,
    Reload,
}

/// Execute the watch command.
pub async fn execute(ctx: &CliContext, admin: bool, interval: u64) -> Result<(), CliError> {
    if interval == 0 {
        return Err(CliError::Arguments(
            "interval must be at least one second".to_string(),
        ));
    }
    let notifier_config = NotifierConfig::new()
        .with_admin(admin)
        .with_poll_interval(Duration::from_secs(interval));

    let input = spawn_stdin_reader();
    let surface = Arc::new(TerminalSurface::stdout());

    println!(
        "Watching {} for updates every {interval}s. Type {} for keys.",
        style(&ctx.config.base_url).cyan(),
        style("h").bold()
    );

    loop {
        match run_session(ctx, &notifier_config, &input, &surface).await? {
            SessionEnd::Quit => break,
            SessionEnd::Reload => {
                info!("Reloading after update");
                surface.clear();
                println!("{}", style("Reloading…").dim());
            }
        }
    }
    Ok(())
}

/// One page lifetime: a fresh notifier and scheduler until quit or reload.
async fn run_session(
    ctx: &CliContext,
    notifier_config: &NotifierConfig,
    input: &LineReceiver,
    surface: &Arc<TerminalSurface<console::Term>>,
) -> Result<SessionEnd, CliError> {
    let reload = Arc::new(ReloadSignal::new());
    let frontend = Frontend {
        surface: surface.clone(),
        prompt: Arc::new(TerminalPrompt::stdout(input.clone())),
        page: reload.clone(),
        events: Arc::new(LogEmitter),
    };
    let notifier = Arc::new(ctx.notifier(frontend, notifier_config.clone())?);
    let visibility = VisibilitySignal::default();
    let scheduler = PollScheduler::spawn(notifier.clone(), visibility.subscribe());

    let end = loop {
        let line = tokio::select! {
            line = next_line(input) => line,
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break SessionEnd::Quit;
            }
        };
        let Some(line) = line else {
            debug!("Input closed");
            break SessionEnd::Quit;
        };
        let Some(key) = WatchKey::parse(&line) else {
            continue;
        };

        match key {
            WatchKey::Update => {
                let outcome = notifier.update_now().await;
                print_outcome(&outcome);
                if reload.take() {
                    break SessionEnd::Reload;
                }
            }
            WatchKey::Dismiss => match notifier.dismiss_current().await {
                Ok(Some(version)) => println!("Dismissed {version}."),
                Ok(None) => println!("Nothing to dismiss."),
                Err(e) => {
                    warn!(error = %e, "Dismissal not saved");
                    println!("Hidden, but the dismissal could not be saved: {e}");
                }
            },
            WatchKey::Recheck => {
                // Leaving and re-entering the foreground triggers a check.
                visibility.set(Visibility::Hidden);
                visibility.set(Visibility::Visible);
            }
            WatchKey::Status => print_status(&notifier.status()),
            WatchKey::Help => print_help(),
            WatchKey::Quit => break SessionEnd::Quit,
            WatchKey::Unknown => println!("Unknown key {:?}. Type h for help.", line.trim()),
        }
    };

    scheduler.stop().await;
    Ok(end)
}

async fn next_line(input: &LineReceiver) -> Option<String> {
    input.lock().await.recv().await
}

fn print_outcome(outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::NotPermitted => {
            println!("Updating requires --admin.");
        }
        UpdateOutcome::Declined => println!("Update cancelled."),
        UpdateOutcome::Applied => {}
        UpdateOutcome::Failed { reason } => debug!(%reason, "Update attempt failed"),
    }
}

fn print_status(status: &NotifierStatus) {
    let checked = status.last_checked_at.map_or_else(
        || "never".to_string(),
        |at| {
            at.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    );
    println!("Last check:  {checked}");
    if let Some(error) = &status.last_error {
        println!("Last error:  {}", style(error).red());
    }
    println!(
        "Candidate:   {}",
        status.candidate_version.as_deref().unwrap_or("none")
    );
    println!("Phase:       {:?}", status.phase);
    println!(
        "Banner:      {}",
        if status.view_present { "shown" } else { "hidden" }
    );
}

fn print_help() {
    println!("  u  Update now");
    println!("  d  Remind me later (dismiss this version)");
    println!("  r  Check for updates now");
    println!("  s  Show notifier status");
    println!("  q  Quit");
}
