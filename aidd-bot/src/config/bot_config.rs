//! BotConfig: BaseConfig + LLM config + pipeline policy + chat system prompt.

use anyhow::Result;
use llm_client::EnvLlmConfig;
use prompt::CHAT_SYSTEM_PROMPT;
use std::env;
use text_to_sql::PipelineConfig;

use super::BaseConfig;

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: EnvLlmConfig,
    pub pipeline: PipelineConfig,
    /// SYSTEM_PROMPT; directive for normal-mode chat.
    pub system_prompt: String,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let llm = EnvLlmConfig::from_env()?;
        let pipeline = PipelineConfig::from_env()?;
        let system_prompt = env::var("SYSTEM_PROMPT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| CHAT_SYSTEM_PROMPT.to_string());
        Ok(Self {
            base,
            llm,
            pipeline,
            system_prompt,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        if self.llm.openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty");
        }
        if reqwest::Url::parse(&self.llm.openai_base_url).is_err() {
            anyhow::bail!(
                "OPENAI_BASE_URL is not a valid URL: {}",
                self.llm.openai_base_url
            );
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn history_limit(&self) -> usize {
        self.pipeline.history_limit
    }
}
