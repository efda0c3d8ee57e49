//! Bot configuration: BaseConfig (Telegram + log + DB) plus LLM, pipeline and prompt settings.

mod base;
mod bot_config;

#[cfg(test)]
mod tests;

pub use base::{BaseConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
pub use bot_config::BotConfig;
