use std::sync::Arc;

use murmur_schema::{ConsentStatus, Notice, NoticeKind};
use murmur_store::ChatStore;

use crate::registry::CommandRegistry;
use crate::surface::{Invocation, Surface};

const GENERIC_FAILURE: &str = "❌ Something went wrong while running that command.";

/// A click on one of the terms-prompt buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    Agree,
    Decline,
}

/// Front door for every inbound invocation: resolves the command,
/// enforces consent for the invoker and any referenced users, and keeps
/// handler failures away from the transport layer.
pub struct CommandGate {
    registry: Arc<CommandRegistry>,
    store: ChatStore,
}

impl CommandGate {
    pub fn new(registry: Arc<CommandRegistry>, store: ChatStore) -> Self {
        Self { registry, store }
    }

    pub async fn dispatch(&self, invocation: &Invocation, surface: &dyn Surface) {
        let Some(command) = self.registry.resolve(&invocation.command) else {
            // Unmatched prefixed text is everyday noise, not an error.
            tracing::debug!(command = %invocation.command, "ignoring unknown command");
            return;
        };

        if !self.store.is_agreed(&invocation.user_id).await {
            if let Err(err) = surface.send_terms_prompt().await {
                tracing::error!("failed to send terms prompt: {err:#}");
            }
            return;
        }

        for target in &invocation.targets {
            if !self.store.is_agreed(&target.user_id).await {
                let notice = Notice::new(
                    NoticeKind::Failure,
                    format!(
                        "{} has not accepted the terms of use. The command cannot be run.",
                        target.username
                    ),
                );
                if let Err(err) = surface.send_notice(&notice).await {
                    tracing::error!("failed to send target rejection: {err:#}");
                }
                return;
            }
        }

        if let Err(err) = command.run(invocation, surface).await {
            tracing::error!(command = command.name(), "command failed: {err:#}");
            let notice = Notice::new(NoticeKind::Failure, GENERIC_FAILURE);
            if let Err(send_err) = surface.send_notice(&notice).await {
                tracing::error!("failed to send failure notice: {send_err:#}");
            }
        }
    }

    /// Resolves a terms-prompt click. Storage failures are logged but do
    /// not block the acknowledgement; the returned notice replaces the
    /// prompt either way.
    pub async fn record_consent_choice(
        &self,
        user_id: &str,
        username: &str,
        guild_id: Option<&str>,
        choice: ConsentChoice,
    ) -> Notice {
        match choice {
            ConsentChoice::Agree => {
                if let Err(err) = self
                    .store
                    .set_consent(user_id, username, ConsentStatus::Agreed)
                    .await
                {
                    tracing::error!(user_id, "failed to record consent: {err}");
                }
                if let Some(guild_id) = guild_id {
                    if let Err(err) = self.store.record_guild(user_id, guild_id).await {
                        tracing::error!(user_id, guild_id, "failed to record guild: {err}");
                    }
                }
                Notice::new(
                    NoticeKind::Success,
                    "You have accepted the terms of use. Enjoy!",
                )
            }
            ConsentChoice::Decline => {
                if let Err(err) = self
                    .store
                    .set_consent(user_id, username, ConsentStatus::Declined)
                    .await
                {
                    tracing::error!(user_id, "failed to record consent: {err}");
                }
                Notice::new(
                    NoticeKind::Info,
                    "You have declined the terms of use and cannot use the bot.",
                )
            }
        }
    }
}
