//! # aidd-bot
//!
//! Chat bot application: loads config from env, opens the SQLite message store, and either runs
//! the Telegram REPL or serves one-shot CLI requests (`ask`, `stats`).
//!
//! Normal chat goes straight to the LLM with the stored history; admin questions go through the
//! text-to-SQL pipeline in the `text-to-sql` crate.

pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod handlers;
pub mod runner;
pub mod stats;
pub mod telegram;

pub use cli::{execute, load_config, Cli, Commands};
pub use components::{build_bot_components, build_services, AppServices, BotComponents};
pub use config::{BaseConfig, BotConfig};
pub use crate::core::{
    init_cli_tracing, init_tracing, Bot, BotError, Chat, Handler, HandlerError, HandlerResponse,
    Message, Result, ToCoreMessage, ToCoreUser, User,
};
pub use handlers::{ChatHandler, Command, WebChat};
pub use runner::run_bot;
pub use telegram::{run_repl, TelegramBotAdapter, TelegramMessageWrapper, TelegramUserWrapper};
