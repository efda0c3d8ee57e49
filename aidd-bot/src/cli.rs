//! CLI parser and the one-shot `ask` / `stats` commands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use text_to_sql::{ChatMode, ChatResponse};

use crate::components::{build_services, open_store, AppServices};
use crate::config::{BaseConfig, BotConfig};
use crate::core::init_cli_tracing;
use crate::handlers::DEFAULT_WEB_CHAT_ID;
use crate::runner::run_bot;
use crate::stats::{self, Period};

#[derive(Parser)]
#[command(name = "aidd")]
#[command(about = "AI chat bot: Telegram runner, web-proxy chat and admin SQL questions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Send one message as the web user and print the reply.
    Ask {
        /// Answer a question about the message store via generated SQL.
        #[arg(long)]
        admin: bool,
        /// Conversation to continue in normal mode.
        #[arg(long, default_value_t = DEFAULT_WEB_CHAT_ID)]
        chat_id: i64,
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print message statistics and the daily timeline.
    Stats {
        /// 7d, 30d or 3m
        #[arg(short, long, default_value = "7d")]
        period: Period,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run { token } => run_bot(load_config(token)?).await,
        Commands::Ask {
            admin,
            chat_id,
            text,
        } => {
            init_cli_tracing()?;
            let config = load_config(None)?;
            config.validate()?;
            let services = build_services(&config).await?;
            let mode = if admin {
                ChatMode::Admin
            } else {
                ChatMode::Normal
            };
            let response = ask(&services, chat_id, &text.join(" "), mode).await?;
            println!("{}", format_response(&response));
            Ok(())
        }
        Commands::Stats { period } => {
            init_cli_tracing()?;
            let base = BaseConfig::load(None)?;
            let store = open_store(&base.database_url).await?;
            let report = stats::collect(store.as_ref(), period).await?;
            print!("{}", report.render());
            Ok(())
        }
    }
}

pub async fn ask(
    services: &AppServices,
    chat_id: i64,
    text: &str,
    mode: ChatMode,
) -> Result<ChatResponse> {
    services.web_chat().process(chat_id, text, mode).await
}

/// Reply text, followed by the SQL when the admin pipeline produced one.
pub fn format_response(response: &ChatResponse) -> String {
    match &response.sql {
        Some(sql) => format!("{}\n\nSQL:\n{}", response.message, sql),
        None => response.message.clone(),
    }
}
