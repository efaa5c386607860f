use async_trait::async_trait;
use murmur_provider::GeminiClient;
use murmur_schema::{ChatRole, Notice, NoticeKind};
use murmur_store::ChatStore;

use crate::prompt::{assemble_prompt, HISTORY_WINDOW};
use crate::registry::Command;
use crate::surface::{Invocation, Surface};

const LOADING_LINE: &str = "💭 Thinking...";
const EMPTY_INPUT_HINT: &str = "Tell me what to chat about, e.g. `chat how are you?`";
const EMPTY_REPLY_FALLBACK: &str = "The model returned an empty reply.";
const COMPLETION_FAILURE: &str = "❌ Something went wrong while talking to the model.";

/// The conversation flow: bounded history window in, completion out,
/// both turns appended back.
pub struct ChatCommand {
    store: ChatStore,
    client: GeminiClient,
    style: String,
}

impl ChatCommand {
    pub fn new(store: ChatStore, client: GeminiClient, style: String) -> Self {
        Self {
            store,
            client,
            style,
        }
    }
}

#[async_trait]
impl Command for ChatCommand {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn description(&self) -> &'static str {
        "Chat with the bot; it remembers your conversation"
    }

    async fn run(&self, invocation: &Invocation, surface: &dyn Surface) -> anyhow::Result<()> {
        let input = invocation.input.trim();
        if input.is_empty() {
            surface.send_text(EMPTY_INPUT_HINT).await?;
            return Ok(());
        }

        surface.send_text(LOADING_LINE).await?;

        let history = self
            .store
            .recent_history(&invocation.user_id, HISTORY_WINDOW)
            .await;
        let prompt = assemble_prompt(&self.style, &history, input);

        match self.client.complete(&prompt).await {
            Ok(reply) => {
                // Append failures must not eat a reply the model already
                // produced; the history gap is the accepted cost.
                if let Err(err) = self
                    .store
                    .append_turn(&invocation.user_id, ChatRole::User, input)
                    .await
                {
                    tracing::error!(user_id = %invocation.user_id, "failed to append user turn: {err}");
                }
                if let Err(err) = self
                    .store
                    .append_turn(&invocation.user_id, ChatRole::Bot, &reply)
                    .await
                {
                    tracing::error!(user_id = %invocation.user_id, "failed to append bot turn: {err}");
                }

                let trimmed = reply.trim();
                let final_reply = if trimmed.is_empty() {
                    EMPTY_REPLY_FALLBACK
                } else {
                    trimmed
                };
                surface.edit_text(final_reply).await?;
            }
            Err(err) => {
                // Status codes and transport detail stay in the log.
                tracing::error!(user_id = %invocation.user_id, "completion call failed: {err}");
                surface
                    .edit_notice(&Notice::new(NoticeKind::Failure, COMPLETION_FAILURE))
                    .await?;
            }
        }

        Ok(())
    }
}
