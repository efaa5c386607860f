use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration, read from the environment (the binary loads a
/// dotenv file first).
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord gateway token (`DISCORD_TOKEN`).
    pub token: String,
    /// Gemini API key (`GOOGLE_API_KEY`).
    pub api_key: String,
    /// Text-command prefix (`PREFIX`, default `!`).
    pub prefix: String,
    /// Style line injected at the top of every prompt (`STYLE`, trimmed,
    /// default empty).
    pub style: String,
    /// SQLite database path (`DB_PATH`, default `murmur.db`).
    pub db_path: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;
        let api_key = env::var("GOOGLE_API_KEY").context("GOOGLE_API_KEY is not set")?;
        let prefix = env::var("PREFIX").unwrap_or_else(|_| "!".to_string());
        let style = env::var("STYLE")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let db_path = env::var("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("murmur.db"));

        Ok(Self {
            token,
            api_key,
            prefix,
            style,
            db_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test touches the process environment, so required and optional
    // handling are checked together rather than in parallel tests.
    #[test]
    fn from_env_requires_token_and_key_and_defaults_the_rest() {
        env::remove_var("DISCORD_TOKEN");
        env::remove_var("GOOGLE_API_KEY");
        env::remove_var("PREFIX");
        env::remove_var("STYLE");
        env::remove_var("DB_PATH");

        let err = BotConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));

        env::set_var("DISCORD_TOKEN", "t0ken");
        let err = BotConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));

        env::set_var("GOOGLE_API_KEY", "k3y");
        env::set_var("STYLE", "  be brief  ");
        let config = BotConfig::from_env().unwrap();
        assert_eq!(config.token, "t0ken");
        assert_eq!(config.api_key, "k3y");
        assert_eq!(config.prefix, "!");
        assert_eq!(config.style, "be brief");
        assert_eq!(config.db_path, PathBuf::from("murmur.db"));
    }
}
