//! OpenAI-compatible LlmClient: wraps openai-client and prepends the system directive.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use openai_client::CompletionParams;
use prompt::ChatMessage;
use tracing::{info, instrument};

use super::{build_request_messages, LlmClient, LlmConfig};

/// LlmClient backed by openai-client.
#[derive(Clone)]
pub struct OpenAILlmClient {
    client: openai_client::OpenAIClient,
    params: CompletionParams,
}

impl OpenAILlmClient {
    /// Builds a client from config (endpoint, model, sampling, timeout).
    pub fn from_config(config: &dyn LlmConfig) -> Result<Self> {
        let client = openai_client::OpenAIClient::new(
            config.api_key().to_string(),
            config.base_url().to_string(),
            Duration::from_secs(config.timeout_secs()),
        )?;
        let params = CompletionParams {
            model: config.model().to_string(),
            temperature: Some(config.temperature()),
            max_tokens: Some(config.max_tokens()),
        };
        info!(model = %params.model, base_url = %config.base_url(), "LLM client initialized");
        Ok(Self { client, params })
    }

    pub fn model(&self) -> &str {
        &self.params.model
    }
}

#[async_trait]
impl LlmClient for OpenAILlmClient {
    #[instrument(skip(self, messages, system_prompt), fields(message_count = messages.len()))]
    async fn get_response(&self, messages: Vec<ChatMessage>, system_prompt: &str) -> Result<String> {
        let request = build_request_messages(system_prompt, &messages)?;
        let answer = self.client.chat_completion(&self.params, request).await?;
        info!(response_len = answer.len(), "Received response from LLM");
        Ok(answer)
    }
}
