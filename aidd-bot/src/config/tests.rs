//! Config tests.

use crate::config::{BaseConfig, BotConfig, DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
use prompt::CHAT_SYSTEM_PROMPT;
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "DATABASE_URL",
    "LOG_FILE",
    "SYSTEM_PROMPT",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "MODEL",
    "LLM_TEMPERATURE",
    "LLM_MAX_TOKENS",
    "LLM_TIMEOUT_SECS",
    "SQL_RESULT_ROW_LIMIT",
    "MAX_HISTORY_MESSAGES",
];

fn clear_env() {
    for name in VARS {
        env::remove_var(name);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("OPENAI_API_KEY", "test_key");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.base().require_bot_token().unwrap(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
    assert_eq!(config.log_file(), DEFAULT_LOG_FILE);
    assert_eq!(config.system_prompt, CHAT_SYSTEM_PROMPT);
    assert_eq!(config.history_limit(), 20);
    assert_eq!(config.pipeline.row_limit, 50);
    assert_eq!(config.llm.llm_timeout_secs, 30);
    assert!(config.validate().is_ok());

    clear_env();
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "custom_key");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("LOG_FILE", "/tmp/aidd.log");
    env::set_var("SYSTEM_PROMPT", "Be brief.");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");
    env::set_var("MAX_HISTORY_MESSAGES", "6");

    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();

    assert_eq!(config.base().require_bot_token().unwrap(), "cli_token");
    assert_eq!(config.database_url(), "sqlite::memory:");
    assert_eq!(config.log_file(), "/tmp/aidd.log");
    assert_eq!(config.system_prompt, "Be brief.");
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert_eq!(config.history_limit(), 6);

    clear_env();
}

#[test]
#[serial]
fn test_missing_api_key_is_an_error() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let err = BotConfig::load(None).unwrap_err();
    assert!(err.to_string().contains("OPENAI_API_KEY"));

    clear_env();
}

#[test]
#[serial]
fn test_missing_token_only_fails_when_required() {
    clear_env();

    let base = BaseConfig::load(None).unwrap();
    assert!(base.bot_token.is_none());
    assert!(base.require_bot_token().is_err());
}

#[test]
#[serial]
fn test_validate_rejects_invalid_telegram_url() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "test_key");
    env::set_var("TELEGRAM_API_URL", "not a url");

    let config = BotConfig::load(None).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("TELEGRAM_API_URL"));

    clear_env();
}
