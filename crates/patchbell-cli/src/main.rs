//! CLI entry point.
//!
//! Commands that talk to the backend or storage go through [`bootstrap`];
//! the pure rendering commands run without it.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use patchbell_cli::handlers::preview::PreviewArgs;
use patchbell_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.as_ref() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Changelog { input } => handlers::changelog::execute(input),
        Commands::Preview {
            current,
            latest,
            changelog,
            admin,
            out,
        } => handlers::preview::execute(PreviewArgs {
            current: current.clone(),
            latest: latest.clone(),
            changelog: changelog.clone(),
            admin: *admin,
            out: out.clone(),
        }),
        Commands::Check => {
            let ctx = bootstrap(CliConfig::from_cli(&cli)?)?;
            handlers::check::execute(&ctx).await
        }
        Commands::Dismissed { command } => {
            let ctx = bootstrap(CliConfig::from_cli(&cli)?)?;
            handlers::dismissed::execute(&ctx, command.clone())
        }
        Commands::Watch { admin, interval } => {
            let ctx = bootstrap(CliConfig::from_cli(&cli)?)?;
            handlers::watch::execute(&ctx, *admin, *interval).await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
    Ok(())
}
