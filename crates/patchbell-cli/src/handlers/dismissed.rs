//! Dismissed-version command handlers.

use patchbell_core::NotifierConfig;

use crate::bootstrap::CliContext;
use crate::commands::DismissedCommand;
use crate::error::CliError;

/// Execute a dismissed-version subcommand.
pub fn execute(ctx: &CliContext, command: DismissedCommand) -> Result<(), CliError> {
    let dismissals = ctx.dismissals(&NotifierConfig::new());

    match command {
        DismissedCommand::List => {
            let versions = dismissals.versions();
            if versions.is_empty() {
                println!("No dismissed versions.");
                return Ok(());
            }
            println!("Dismissed versions ({}):", versions.len());
            for version in versions {
                println!("  {version}");
            }
        }
        DismissedCommand::Add { version } => {
            let version = version.trim();
            if version.is_empty() {
                return Err(CliError::Arguments("version must not be empty".to_string()));
            }
            if dismissals.dismiss(version)? {
                println!("Dismissed {version}.");
            } else {
                println!("{version} was already dismissed.");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use tempfile::tempdir;

    fn context(dir: &tempfile::TempDir) -> CliContext {
        bootstrap(CliConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            storage_path: dir.path().join("storage.json"),
        })
        .unwrap()
    }

    #[test]
    fn test_add_persists() {
        let dir = tempdir().unwrap();
        execute(
            &context(&dir),
            DismissedCommand::Add {
                version: "1.2.0".to_string(),
            },
        )
        .unwrap();

        let reopened = context(&dir);
        assert!(reopened.dismissals(&NotifierConfig::new()).is_dismissed("1.2.0"));
        assert!(execute(&reopened, DismissedCommand::List).is_ok());
    }

    #[test]
    fn test_add_rejects_blank_version() {
        let dir = tempdir().unwrap();
        let result = execute(
            &context(&dir),
            DismissedCommand::Add {
                version: "  ".to_string(),
            },
        );
        assert!(matches!(result, Err(CliError::Arguments(_))));
    }
}
