//! Component factory: builds the store, LLM client and chat service from config, and the
//! Telegram bot on top of them.

use anyhow::{Context, Result};
use llm_client::{LlmClient, OpenAILlmClient};
use std::sync::Arc;
use storage::SqliteMessageStore;
use teloxide::prelude::*;
use text_to_sql::{ChatService, PipelineConfig};
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::core::Bot as CoreBot;
use crate::handlers::{ChatHandler, WebChat};
use crate::telegram::TelegramBotAdapter;

/// Transport-independent services shared by the bot and the CLI.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<SqliteMessageStore>,
    pub chat_service: Arc<ChatService>,
    pub history_limit: usize,
}

impl AppServices {
    /// Assembles services around an existing store and LLM client.
    pub fn with_parts(
        store: Arc<SqliteMessageStore>,
        llm: Arc<dyn LlmClient>,
        pipeline: PipelineConfig,
        system_prompt: &str,
    ) -> Self {
        let chat_service = Arc::new(ChatService::new(
            llm,
            store.clone(),
            pipeline,
            system_prompt,
        ));
        Self {
            store,
            chat_service,
            history_limit: pipeline.history_limit,
        }
    }

    pub fn web_chat(&self) -> WebChat {
        WebChat::new(
            self.store.clone(),
            self.chat_service.clone(),
            self.history_limit,
        )
    }

    pub fn chat_handler(&self, bot: Arc<dyn CoreBot>) -> ChatHandler {
        ChatHandler::new(
            bot,
            self.store.clone(),
            self.chat_service.clone(),
            self.history_limit,
        )
    }
}

pub async fn open_store(database_url: &str) -> Result<Arc<SqliteMessageStore>> {
    let store = SqliteMessageStore::new(database_url).await.map_err(|e| {
        error!(error = %e, database_url = %database_url, "Failed to initialize message storage");
        anyhow::anyhow!("Failed to initialize message storage: {}", e)
    })?;
    Ok(Arc::new(store))
}

#[instrument(skip(config))]
pub async fn build_services(config: &BotConfig) -> Result<AppServices> {
    let store = open_store(config.database_url()).await?;
    let llm = OpenAILlmClient::from_config(&config.llm).context("Failed to build LLM client")?;
    info!(model = %llm.model(), "LLM client ready");

    Ok(AppServices::with_parts(
        store,
        Arc::new(llm),
        config.pipeline,
        &config.system_prompt,
    ))
}

pub struct BotComponents {
    pub services: AppServices,
    pub teloxide_bot: Bot,
    pub bot_adapter: Arc<dyn CoreBot>,
}

/// Invalid API URLs are rejected by `BotConfig::validate`; here one falls back to the default.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> Bot {
    let bot = Bot::new(token);
    match api_url.map(reqwest::Url::parse) {
        Some(Ok(url)) => bot.set_api_url(url),
        Some(Err(e)) => {
            error!(error = %e, "Invalid TELEGRAM_API_URL, using default");
            bot
        }
        None => bot,
    }
}

#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let token = config.base().require_bot_token()?;
    let services = build_services(config).await?;
    let teloxide_bot = build_teloxide_bot(token, config.telegram_api_url());
    let bot_adapter: Arc<dyn CoreBot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    Ok(BotComponents {
        services,
        teloxide_bot,
        bot_adapter,
    })
}
