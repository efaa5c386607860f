use std::time::Duration;

use async_trait::async_trait;
use murmur_schema::Notice;
use tokio::sync::Mutex;

use crate::confirm::ConfirmChoice;
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Sent {
    Text(String),
    EditText(String),
    Notice(Notice),
    EditNotice(Notice),
    TermsPrompt,
    ConfirmPrompt(Notice),
}

/// Records everything a command sends; confirmation prompts resolve to a
/// scripted choice.
pub(crate) struct RecordingSurface {
    sent: Mutex<Vec<Sent>>,
    confirm_choice: ConfirmChoice,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_choice(ConfirmChoice::TimedOut)
    }

    pub fn with_choice(confirm_choice: ConfirmChoice) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            confirm_choice,
        }
    }

    pub async fn events(&self) -> Vec<Sent> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    async fn send_text(&self, text: &str) -> anyhow::Result<()> {
        self.sent.lock().await.push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn edit_text(&self, text: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .await
            .push(Sent::EditText(text.to_string()));
        Ok(())
    }

    async fn send_notice(&self, notice: &Notice) -> anyhow::Result<()> {
        self.sent.lock().await.push(Sent::Notice(notice.clone()));
        Ok(())
    }

    async fn edit_notice(&self, notice: &Notice) -> anyhow::Result<()> {
        self.sent
            .lock()
            .await
            .push(Sent::EditNotice(notice.clone()));
        Ok(())
    }

    async fn send_terms_prompt(&self) -> anyhow::Result<()> {
        self.sent.lock().await.push(Sent::TermsPrompt);
        Ok(())
    }

    async fn await_confirmation(
        &self,
        prompt: &Notice,
        _timeout: Duration,
    ) -> anyhow::Result<ConfirmChoice> {
        self.sent
            .lock()
            .await
            .push(Sent::ConfirmPrompt(prompt.clone()));
        Ok(self.confirm_choice)
    }
}
