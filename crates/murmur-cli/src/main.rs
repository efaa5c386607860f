use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use murmur_core::{build_registry, BotConfig, CommandGate};
use murmur_discord::DiscordBot;
use murmur_provider::GeminiClient;
use murmur_store::ChatStore;

#[derive(Parser)]
#[command(name = "murmur", version, about = "Discord chat bot with conversation memory")]
struct Cli {
    #[arg(long, help = "SQLite database path (overrides DB_PATH)")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = BotConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let store = ChatStore::open(&config.db_path)?;
    tracing::info!(db = %config.db_path.display(), "chat store ready");

    let client = GeminiClient::new(config.api_key.clone());
    let registry = Arc::new(build_registry(
        store.clone(),
        client,
        config.style.clone(),
        config.prefix.clone(),
    ));
    let gate = Arc::new(CommandGate::new(registry, store));

    tracing::info!(prefix = %config.prefix, "starting discord bot");
    DiscordBot::new(config.token, config.prefix, gate).run().await
}
