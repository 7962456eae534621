//! User interaction port: confirmation prompts and alerts.

use async_trait::async_trait;

/// Port for blocking user dialogs.
///
/// Both calls suspend the caller until the user answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPrompt: Send + Sync {
    /// Ask a yes/no question.
    async fn confirm(&self, message: &str) -> bool;

    /// Show a message that the user must acknowledge.
    async fn alert(&self, message: &str);
}
