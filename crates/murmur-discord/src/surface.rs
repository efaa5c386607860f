use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use murmur_core::{ConfirmChoice, Surface};
use murmur_schema::Notice;
use serenity::all::{
    CommandInteraction, ComponentInteraction, ComponentInteractionCollector, Context,
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, EditMessage, Http,
    Message, ShardMessenger,
};
use tokio::sync::Mutex;

use crate::render;

/// Surface for prefixed text commands: replies are channel messages
/// referencing the origin, edits target the bot's own earlier reply.
pub(crate) struct TextSurface {
    http: Arc<Http>,
    shard: ShardMessenger,
    origin: Message,
    guild_name: Option<String>,
    sent: Mutex<Option<Message>>,
    pending: Mutex<Option<ComponentInteraction>>,
}

impl TextSurface {
    pub fn new(ctx: &Context, origin: Message, guild_name: Option<String>) -> Self {
        Self {
            http: ctx.http.clone(),
            shard: ctx.shard.clone(),
            origin,
            guild_name,
            sent: Mutex::new(None),
            pending: Mutex::new(None),
        }
    }

    async fn send(&self, builder: CreateMessage) -> Result<Message> {
        let message = self
            .origin
            .channel_id
            .send_message(&self.http, builder.reference_message(&self.origin))
            .await?;
        Ok(message)
    }
}

#[async_trait]
impl Surface for TextSurface {
    async fn send_text(&self, text: &str) -> Result<()> {
        let message = self.send(CreateMessage::new().content(text)).await?;
        *self.sent.lock().await = Some(message);
        Ok(())
    }

    async fn edit_text(&self, text: &str) -> Result<()> {
        let mut sent = self.sent.lock().await;
        match sent.as_mut() {
            Some(message) => {
                message
                    .edit(
                        &self.http,
                        EditMessage::new()
                            .content(text)
                            .embeds(vec![])
                            .components(vec![]),
                    )
                    .await?;
                Ok(())
            }
            None => {
                drop(sent);
                self.send_text(text).await
            }
        }
    }

    async fn send_notice(&self, notice: &Notice) -> Result<()> {
        let message = self
            .send(CreateMessage::new().embed(render::notice_embed(notice)))
            .await?;
        *self.sent.lock().await = Some(message);
        Ok(())
    }

    async fn edit_notice(&self, notice: &Notice) -> Result<()> {
        if let Some(interaction) = self.pending.lock().await.take() {
            let response = CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("")
                    .embed(render::notice_embed(notice))
                    .components(vec![]),
            );
            interaction.create_response(&self.http, response).await?;
            return Ok(());
        }

        let mut sent = self.sent.lock().await;
        match sent.as_mut() {
            Some(message) => {
                message
                    .edit(
                        &self.http,
                        EditMessage::new()
                            .content("")
                            .embed(render::notice_embed(notice))
                            .components(vec![]),
                    )
                    .await?;
                Ok(())
            }
            None => {
                drop(sent);
                self.send_notice(notice).await
            }
        }
    }

    async fn send_terms_prompt(&self) -> Result<()> {
        let (embed, row) = render::terms_prompt();
        self.send(CreateMessage::new().embed(embed).components(vec![row]))
            .await?;
        Ok(())
    }

    async fn await_confirmation(
        &self,
        prompt: &Notice,
        timeout: Duration,
    ) -> Result<ConfirmChoice> {
        let (embed, row) =
            render::confirm_prompt(prompt, &self.origin.author, self.guild_name.as_deref());
        let message = self
            .send(CreateMessage::new().embed(embed).components(vec![row]))
            .await?;

        let collected = ComponentInteractionCollector::new(&self.shard)
            .message_id(message.id)
            .author_id(self.origin.author.id)
            .timeout(timeout)
            .await;

        *self.sent.lock().await = Some(message);

        match collected {
            Some(interaction) => {
                let choice = if interaction.data.custom_id == render::CONFIRM_BUTTON {
                    ConfirmChoice::Confirmed
                } else {
                    ConfirmChoice::Cancelled
                };
                *self.pending.lock().await = Some(interaction);
                Ok(choice)
            }
            None => Ok(ConfirmChoice::TimedOut),
        }
    }
}

/// Surface for slash commands: the first send acknowledges the
/// interaction, later sends become follow-ups, edits rewrite the
/// original response.
pub(crate) struct SlashSurface {
    http: Arc<Http>,
    shard: ShardMessenger,
    interaction: CommandInteraction,
    guild_name: Option<String>,
    responded: Mutex<bool>,
    pending: Mutex<Option<ComponentInteraction>>,
}

impl SlashSurface {
    pub fn new(ctx: &Context, interaction: CommandInteraction, guild_name: Option<String>) -> Self {
        Self {
            http: ctx.http.clone(),
            shard: ctx.shard.clone(),
            interaction,
            guild_name,
            responded: Mutex::new(false),
            pending: Mutex::new(None),
        }
    }

    async fn respond(&self, message: CreateInteractionResponseMessage) -> Result<()> {
        let mut responded = self.responded.lock().await;
        self.interaction
            .create_response(&self.http, CreateInteractionResponse::Message(message))
            .await?;
        *responded = true;
        Ok(())
    }

    async fn has_responded(&self) -> bool {
        *self.responded.lock().await
    }
}

#[async_trait]
impl Surface for SlashSurface {
    async fn send_text(&self, text: &str) -> Result<()> {
        if self.has_responded().await {
            self.interaction
                .create_followup(
                    &self.http,
                    CreateInteractionResponseFollowup::new().content(text),
                )
                .await?;
            return Ok(());
        }
        self.respond(CreateInteractionResponseMessage::new().content(text))
            .await
    }

    async fn edit_text(&self, text: &str) -> Result<()> {
        if !self.has_responded().await {
            return self.send_text(text).await;
        }
        self.interaction
            .edit_response(
                &self.http,
                EditInteractionResponse::new()
                    .content(text)
                    .embeds(vec![])
                    .components(vec![]),
            )
            .await?;
        Ok(())
    }

    async fn send_notice(&self, notice: &Notice) -> Result<()> {
        if self.has_responded().await {
            self.interaction
                .create_followup(
                    &self.http,
                    CreateInteractionResponseFollowup::new().embed(render::notice_embed(notice)),
                )
                .await?;
            return Ok(());
        }
        self.respond(CreateInteractionResponseMessage::new().embed(render::notice_embed(notice)))
            .await
    }

    async fn edit_notice(&self, notice: &Notice) -> Result<()> {
        if let Some(interaction) = self.pending.lock().await.take() {
            let response = CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content("")
                    .embed(render::notice_embed(notice))
                    .components(vec![]),
            );
            interaction.create_response(&self.http, response).await?;
            return Ok(());
        }

        if !self.has_responded().await {
            return self.send_notice(notice).await;
        }
        self.interaction
            .edit_response(
                &self.http,
                EditInteractionResponse::new()
                    .content("")
                    .embed(render::notice_embed(notice))
                    .components(vec![]),
            )
            .await?;
        Ok(())
    }

    async fn send_terms_prompt(&self) -> Result<()> {
        let (embed, row) = render::terms_prompt();
        if self.has_responded().await {
            self.interaction
                .create_followup(
                    &self.http,
                    CreateInteractionResponseFollowup::new()
                        .embed(embed)
                        .components(vec![row]),
                )
                .await?;
            return Ok(());
        }
        self.respond(
            CreateInteractionResponseMessage::new()
                .embed(embed)
                .components(vec![row]),
        )
        .await
    }

    async fn await_confirmation(
        &self,
        prompt: &Notice,
        timeout: Duration,
    ) -> Result<ConfirmChoice> {
        let (embed, row) =
            render::confirm_prompt(prompt, &self.interaction.user, self.guild_name.as_deref());
        self.respond(
            CreateInteractionResponseMessage::new()
                .embed(embed)
                .components(vec![row]),
        )
        .await?;

        let message = self.interaction.get_response(&self.http).await?;

        let collected = ComponentInteractionCollector::new(&self.shard)
            .message_id(message.id)
            .author_id(self.interaction.user.id)
            .timeout(timeout)
            .await;

        match collected {
            Some(interaction) => {
                let choice = if interaction.data.custom_id == render::CONFIRM_BUTTON {
                    ConfirmChoice::Confirmed
                } else {
                    ConfirmChoice::Cancelled
                };
                *self.pending.lock().await = Some(interaction);
                Ok(choice)
            }
            None => Ok(ConfirmChoice::TimedOut),
        }
    }
}
