use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::build_bot_components;
use crate::config::BotConfig;
use crate::core::{init_tracing, Handler};
use crate::telegram::run_repl;

/// Main entry: validate config, init logging, build components, then run the REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        model = %config.llm.llm_model,
        history_limit = config.history_limit(),
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let handler: Arc<dyn Handler> = Arc::new(
        components
            .services
            .chat_handler(components.bot_adapter.clone()),
    );

    info!("Bot started successfully");
    run_repl(components.teloxide_bot, handler).await
}
