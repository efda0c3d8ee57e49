//! Base config: Telegram connection, logging, database. Loaded from env.

use anyhow::Result;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./aidd_bot.db";
pub const DEFAULT_LOG_FILE: &str = "logs/aidd-bot.log";

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN; only required to run the Telegram bot.
    pub bot_token: Option<String>,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// DATABASE_URL (SQLite, e.g. `sqlite://./aidd_bot.db` or `sqlite::memory:`)
    pub database_url: String,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            bot_token: token.or_else(|| non_empty_var("BOT_TOKEN")),
            telegram_api_url: non_empty_var("TELEGRAM_API_URL")
                .or_else(|| non_empty_var("TELOXIDE_API_URL")),
            log_file: non_empty_var("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
            database_url: non_empty_var("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        })
    }

    /// Token for the Telegram runner; an error when neither `--token` nor BOT_TOKEN is set.
    pub fn require_bot_token(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN not set (or pass --token)"))
    }

    /// telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
