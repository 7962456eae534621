//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Update API client (via patchbell-http)
//! - Key-value storage (via patchbell-store)
//!
//! Handlers receive the composed context and build notifiers from it.

use std::path::PathBuf;
use std::sync::Arc;

use patchbell_core::{
    DismissalStore, KeyValueStore, NotificationSurface, NotifierConfig, NotifierDeps,
    NotifierEventEmitter, PageLifecycle, UpdateApiPort, UpdateNotifier, UserPrompt,
};
use patchbell_http::{DefaultUpdateClient, UpdateClientConfig};
use patchbell_store::{FileStore, default_storage_path};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Base URL of the update backend.
    pub base_url: String,
    /// Path of the storage file.
    pub storage_path: PathBuf,
}

impl CliConfig {
    /// Resolve configuration from parsed arguments.
    ///
    /// The storage path falls back to the platform data directory.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let storage_path = match &cli.storage {
            Some(path) => path.clone(),
            None => default_storage_path()?,
        };
        Ok(Self {
            base_url: cli.base_url.clone(),
            storage_path,
        })
    }
}

/// Ports a notifier needs besides the backend and storage.
///
/// These differ per command: `watch` draws on the terminal, tests record.
pub struct Frontend {
    pub surface: Arc<dyn NotificationSurface>,
    pub prompt: Arc<dyn UserPrompt>,
    pub page: Arc<dyn PageLifecycle>,
    pub events: Arc<dyn NotifierEventEmitter>,
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// Update backend client.
    pub api: Arc<dyn UpdateApiPort>,
    /// Local storage.
    pub storage: Arc<dyn KeyValueStore>,
    /// Configuration the context was built from.
    pub config: CliConfig,
}

impl CliContext {
    /// Load the dismissed-version set from storage.
    pub fn dismissals(&self, notifier_config: &NotifierConfig) -> DismissalStore {
        DismissalStore::load(self.storage.clone(), notifier_config.storage_key.clone())
    }

    /// Build a notifier over this context's backend and storage.
    ///
    /// Every call returns a notifier with fresh in-memory state, which is
    /// what a page reload amounts to.
    pub fn notifier(
        &self,
        frontend: Frontend,
        notifier_config: NotifierConfig,
    ) -> Result<UpdateNotifier, CliError> {
        let deps = NotifierDeps {
            api: self.api.clone(),
            storage: self.storage.clone(),
            surface: frontend.surface,
            prompt: frontend.prompt,
            page: frontend.page,
            events: frontend.events,
        };
        Ok(UpdateNotifier::new(deps, notifier_config)?)
    }
}

/// Bootstrap the CLI application.
///
/// Builds the HTTP client and opens the storage file. Neither touches the
/// network.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let client_config = UpdateClientConfig::new().with_base_url(&config.base_url);
    let api: Arc<dyn UpdateApiPort> = Arc::new(DefaultUpdateClient::new(&client_config)?);

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_path)?);

    debug!(
        base_url = %config.base_url,
        storage = %config.storage_path.display(),
        "CLI context ready"
    );

    Ok(CliContext {
        api,
        storage,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_bootstrap_with_explicit_storage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let cli = Cli::parse_from([
            "patchbell",
            "--base-url",
            "http://127.0.0.1:9",
            "--storage",
            path.to_str().unwrap(),
            "check",
        ]);

        let config = CliConfig::from_cli(&cli).unwrap();
        assert_eq!(config.storage_path, path);

        let ctx = bootstrap(config).unwrap();
        let dismissals = ctx.dismissals(&NotifierConfig::new());
        assert!(dismissals.versions().is_empty());
    }

    #[test]
    fn test_bootstrap_rejects_bad_base_url() {
        let dir = tempdir().unwrap();
        let config = CliConfig {
            base_url: "no scheme here".to_string(),
            storage_path: dir.path().join("storage.json"),
        };
        assert!(matches!(bootstrap(config), Err(CliError::Config(_))));
    }
}
