mod render;
mod slash;
mod surface;

use std::sync::Arc;

use murmur_core::{CommandGate, ConsentChoice, Invocation, InvocationKind, TargetUser};
use serenity::all::{
    Client, Context, CreateInteractionResponse, CreateInteractionResponseMessage, EventHandler,
    GatewayIntents, Guild, GuildId, Interaction, Message, Ready, ResolvedValue,
};
use serenity::async_trait;

use surface::{SlashSurface, TextSurface};

pub struct DiscordBot {
    token: String,
    prefix: String,
    gate: Arc<CommandGate>,
}

impl DiscordBot {
    pub fn new(token: String, prefix: String, gate: Arc<CommandGate>) -> Self {
        Self {
            token,
            prefix,
            gate,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
            | GatewayIntents::GUILD_MESSAGE_REACTIONS;

        let handler = Handler {
            prefix: self.prefix,
            gate: self.gate,
        };

        let mut client = Client::builder(&self.token, intents)
            .event_handler(handler)
            .await?;
        client.start().await?;
        Ok(())
    }
}

struct Handler {
    prefix: String,
    gate: Arc<CommandGate>,
}

/// Splits `<prefix><command> [args...]` into a lowercased command name
/// and the remaining input. `None` for anything that is not a prefixed
/// command.
fn parse_prefixed(content: &str, prefix: &str) -> Option<(String, String)> {
    if prefix.is_empty() {
        return None;
    }
    let rest = content.strip_prefix(prefix)?.trim();
    let mut words = rest.split_whitespace();
    let name = words.next()?;
    let input = words.collect::<Vec<_>>().join(" ");
    Some((name.to_lowercase(), input))
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("discord bot connected: {}", ready.user.name);

        let guild_ids: Vec<GuildId> = ready.guilds.iter().map(|guild| guild.id).collect();
        for guild_id in &guild_ids {
            if let Err(err) = slash::register_guild_commands(&ctx.http, *guild_id).await {
                tracing::error!(guild_id = %guild_id, "failed to register slash commands: {err}");
            }
        }
        tracing::info!(guilds = guild_ids.len(), "slash commands registered");

        slash::refresh_presence(&ctx, &guild_ids).await;
    }

    async fn guild_create(&self, ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new.unwrap_or(false) {
            tracing::info!(guild = %guild.name, "joined a new guild");
        }
        if let Err(err) = slash::register_guild_commands(&ctx.http, guild.id).await {
            tracing::error!(guild_id = %guild.id, "failed to register slash commands: {err}");
        }
        let guild_ids = ctx.cache.guilds();
        slash::refresh_presence(&ctx, &guild_ids).await;
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some((command, input)) = parse_prefixed(&msg.content, &self.prefix) else {
            return;
        };

        let targets = msg
            .mentions
            .iter()
            .map(|user| TargetUser {
                user_id: user.id.to_string(),
                username: user.name.clone(),
            })
            .collect();
        let guild_name = msg
            .guild_id
            .and_then(|gid| ctx.cache.guild(gid).map(|guild| guild.name.clone()));

        let invocation = Invocation {
            kind: InvocationKind::Text,
            command,
            input,
            user_id: msg.author.id.to_string(),
            username: msg.author.name.clone(),
            guild_id: msg.guild_id.map(|gid| gid.to_string()),
            guild_name: guild_name.clone(),
            targets,
        };

        let surface = TextSurface::new(&ctx, msg, guild_name);
        self.gate.dispatch(&invocation, &surface).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                let mut input = String::new();
                let mut targets = Vec::new();
                for option in command.data.options() {
                    match option.value {
                        ResolvedValue::String(value) if option.name == "content" => {
                            input = value.to_string();
                        }
                        ResolvedValue::User(user, _) => targets.push(TargetUser {
                            user_id: user.id.to_string(),
                            username: user.name.clone(),
                        }),
                        _ => {}
                    }
                }

                let guild_name = command
                    .guild_id
                    .and_then(|gid| ctx.cache.guild(gid).map(|guild| guild.name.clone()));

                let invocation = Invocation {
                    kind: InvocationKind::Slash,
                    command: command.data.name.clone(),
                    input,
                    user_id: command.user.id.to_string(),
                    username: command.user.name.clone(),
                    guild_id: command.guild_id.map(|gid| gid.to_string()),
                    guild_name: guild_name.clone(),
                    targets,
                };

                let surface = SlashSurface::new(&ctx, command, guild_name);
                self.gate.dispatch(&invocation, &surface).await;
            }
            Interaction::Component(component) => {
                let choice = match component.data.custom_id.as_str() {
                    render::AGREE_BUTTON => ConsentChoice::Agree,
                    render::DECLINE_BUTTON => ConsentChoice::Decline,
                    // The clear-memory buttons are owned by their
                    // per-invocation collector.
                    _ => return,
                };

                let guild_id = component.guild_id.map(|gid| gid.to_string());
                let notice = self
                    .gate
                    .record_consent_choice(
                        &component.user.id.to_string(),
                        &component.user.name,
                        guild_id.as_deref(),
                        choice,
                    )
                    .await;

                let response = CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::new()
                        .content(notice.body.clone())
                        .embeds(vec![])
                        .components(vec![]),
                );
                if let Err(err) = component.create_response(&ctx.http, response).await {
                    tracing::error!("failed to update the terms prompt: {err}");
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_prefixed_splits_command_and_input() {
        assert_eq!(
            parse_prefixed("!chat how are you?", "!"),
            Some(("chat".to_string(), "how are you?".to_string()))
        );
    }

    #[test]
    fn parse_prefixed_lowercases_the_command() {
        assert_eq!(
            parse_prefixed("!Chat hi", "!"),
            Some(("chat".to_string(), "hi".to_string()))
        );
    }

    #[test]
    fn parse_prefixed_handles_bare_command() {
        assert_eq!(
            parse_prefixed("!cm", "!"),
            Some(("cm".to_string(), String::new()))
        );
    }

    #[test]
    fn parse_prefixed_collapses_argument_whitespace() {
        assert_eq!(
            parse_prefixed("!chat   a   b ", "!"),
            Some(("chat".to_string(), "a b".to_string()))
        );
    }

    #[test]
    fn parse_prefixed_rejects_unprefixed_and_empty() {
        assert_eq!(parse_prefixed("chat hi", "!"), None);
        assert_eq!(parse_prefixed("!", "!"), None);
        assert_eq!(parse_prefixed("   ", "!"), None);
    }

    #[test]
    fn empty_prefix_never_matches() {
        assert_eq!(parse_prefixed("chat hi", ""), None);
    }
}
