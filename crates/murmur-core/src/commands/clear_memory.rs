use async_trait::async_trait;
use murmur_schema::{Notice, NoticeKind};
use murmur_store::ChatStore;

use crate::confirm::{ConfirmChoice, CONFIRM_TIMEOUT};
use crate::registry::Command;
use crate::surface::{Invocation, Surface};

/// Purges a user's conversation history behind a confirm/cancel prompt.
/// Exactly one terminal outcome per invocation: purge, cancellation
/// notice, or timeout notice.
pub struct ClearMemoryCommand {
    store: ChatStore,
}

impl ClearMemoryCommand {
    pub fn new(store: ChatStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Command for ClearMemoryCommand {
    fn name(&self) -> &'static str {
        "clear_memory"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["cm"]
    }

    fn description(&self) -> &'static str {
        "Delete your conversation history"
    }

    async fn run(&self, invocation: &Invocation, surface: &dyn Surface) -> anyhow::Result<()> {
        let prompt = Notice::titled(
            NoticeKind::Info,
            "⚠️ Confirm history deletion",
            "Are you sure you want to delete your entire conversation history? \
             This cannot be undone.",
        );

        match surface.await_confirmation(&prompt, CONFIRM_TIMEOUT).await? {
            ConfirmChoice::Confirmed => match self.store.purge_history(&invocation.user_id).await {
                Ok(_) => {
                    surface
                        .edit_notice(&Notice::titled(
                            NoticeKind::Success,
                            "🗑️ History deleted",
                            "Your conversation history has been removed.",
                        ))
                        .await?;
                }
                Err(err) => {
                    tracing::error!(user_id = %invocation.user_id, "failed to purge history: {err}");
                    surface
                        .edit_notice(&Notice::titled(
                            NoticeKind::Failure,
                            "❌ Error",
                            "Something went wrong while deleting your history.",
                        ))
                        .await?;
                }
            },
            ConfirmChoice::Cancelled => {
                surface
                    .edit_notice(&Notice::titled(
                        NoticeKind::Cancelled,
                        "🚫 Deletion cancelled",
                        "Your conversation history is untouched.",
                    ))
                    .await?;
            }
            ConfirmChoice::TimedOut => {
                surface
                    .edit_notice(&Notice::titled(
                        NoticeKind::TimedOut,
                        "⌛ Confirmation timed out",
                        "No choice was made in time. Nothing was deleted.",
                    ))
                    .await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use murmur_schema::ChatRole;

    use crate::surface::InvocationKind;
    use crate::test_util::{RecordingSurface, Sent};

    use super::*;

    fn invocation() -> Invocation {
        Invocation {
            kind: InvocationKind::Slash,
            command: "clear_memory".to_string(),
            input: String::new(),
            user_id: "u1".to_string(),
            username: "alice".to_string(),
            guild_id: None,
            guild_name: None,
            targets: vec![],
        }
    }

    async fn seeded_store() -> ChatStore {
        let store = ChatStore::open_in_memory().unwrap();
        store.append_turn("u1", ChatRole::User, "a").await.unwrap();
        store.append_turn("u1", ChatRole::Bot, "b").await.unwrap();
        store
    }

    fn terminal_notices(events: &[Sent]) -> Vec<&Notice> {
        events
            .iter()
            .filter_map(|event| match event {
                Sent::EditNotice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn confirmed_purges_and_reports_success() {
        let store = seeded_store().await;
        let command = ClearMemoryCommand::new(store.clone());
        let surface = RecordingSurface::with_choice(ConfirmChoice::Confirmed);

        command.run(&invocation(), &surface).await.unwrap();

        assert!(store.recent_history("u1", 10).await.is_empty());
        let events = surface.events().await;
        let notices = terminal_notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
    }

    #[tokio::test]
    async fn cancelled_leaves_history_untouched() {
        let store = seeded_store().await;
        let command = ClearMemoryCommand::new(store.clone());
        let surface = RecordingSurface::with_choice(ConfirmChoice::Cancelled);

        command.run(&invocation(), &surface).await.unwrap();

        assert_eq!(store.recent_history("u1", 10).await.len(), 2);
        let events = surface.events().await;
        let notices = terminal_notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Cancelled);
    }

    #[tokio::test]
    async fn timeout_leaves_history_untouched() {
        let store = seeded_store().await;
        let command = ClearMemoryCommand::new(store.clone());
        let surface = RecordingSurface::with_choice(ConfirmChoice::TimedOut);

        command.run(&invocation(), &surface).await.unwrap();

        assert_eq!(store.recent_history("u1", 10).await.len(), 2);
        let events = surface.events().await;
        let notices = terminal_notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::TimedOut);
    }

    #[tokio::test]
    async fn purging_an_empty_history_still_succeeds() {
        let store = ChatStore::open_in_memory().unwrap();
        let command = ClearMemoryCommand::new(store);
        let surface = RecordingSurface::with_choice(ConfirmChoice::Confirmed);

        command.run(&invocation(), &surface).await.unwrap();

        let events = surface.events().await;
        let notices = terminal_notices(&events);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::Success);
    }
}
