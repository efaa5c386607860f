use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use murmur_schema::Notice;

use crate::confirm::ConfirmChoice;

/// Which surface a command came in on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationKind {
    Slash,
    Text,
}

/// Another user referenced by the invocation (a mention or a user
/// option); each of them is consent-checked before the handler runs.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetUser {
    pub user_id: String,
    pub username: String,
}

/// A parsed command invocation, normalized across the slash and
/// prefixed-text surfaces.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub kind: InvocationKind,
    pub command: String,
    pub input: String,
    pub user_id: String,
    pub username: String,
    pub guild_id: Option<String>,
    pub guild_name: Option<String>,
    pub targets: Vec<TargetUser>,
}

/// Reply capabilities of one invocation. Implemented per surface variant
/// by the channel glue; the core never talks to the chat SDK directly.
#[async_trait]
pub trait Surface: Send + Sync {
    /// Sends a plain-text reply (the first one acknowledges the
    /// invocation).
    async fn send_text(&self, text: &str) -> Result<()>;

    /// Edits the reply sent earlier in this invocation.
    async fn edit_text(&self, text: &str) -> Result<()>;

    /// Sends a styled notice.
    async fn send_notice(&self, notice: &Notice) -> Result<()>;

    /// Replaces the earlier reply with a styled notice and removes any
    /// interactive controls.
    async fn edit_notice(&self, notice: &Notice) -> Result<()>;

    /// Shows the terms-of-use prompt with its agree/decline buttons.
    async fn send_terms_prompt(&self) -> Result<()>;

    /// Shows a confirm/cancel prompt scoped to the invoking user and
    /// waits for at most one qualifying click, or the timeout.
    async fn await_confirmation(
        &self,
        prompt: &Notice,
        timeout: Duration,
    ) -> Result<ConfirmChoice>;
}
