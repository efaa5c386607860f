use serenity::all::{
    ActivityData, CommandOptionType, Context, CreateCommand, CreateCommandOption, GuildId, Http,
};

/// The slash-command set, mirrored from the command registry. Option
/// schemas live here because they are a transport concern.
pub(crate) fn command_definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("chat")
            .description("Chat with the bot; it remembers your conversation")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "content", "What to say")
                    .required(true),
            ),
        CreateCommand::new("clear_memory").description("Delete your conversation history"),
        CreateCommand::new("help").description("Show the command list"),
    ]
}

pub(crate) async fn register_guild_commands(http: &Http, guild_id: GuildId) -> serenity::Result<()> {
    guild_id.set_commands(http, command_definitions()).await?;
    Ok(())
}

/// Sums approximate member counts across guilds and reflects the total
/// in the bot's activity line. Count fetch failures only cost accuracy.
pub(crate) async fn refresh_presence(ctx: &Context, guild_ids: &[GuildId]) {
    let mut total: u64 = 0;
    for guild_id in guild_ids {
        match ctx.http.get_guild_with_counts(*guild_id).await {
            Ok(guild) => total += guild.approximate_member_count.unwrap_or(0),
            Err(err) => {
                tracing::warn!(guild_id = %guild_id, "failed to fetch member count: {err}");
            }
        }
    }
    ctx.set_activity(Some(ActivityData::playing(format!("with {total} members"))));
}
