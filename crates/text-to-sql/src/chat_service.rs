//! Mode dispatch between plain chat and the admin text-to-SQL pipeline.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use llm_client::LlmClient;
use prompt::ChatMessage;
use storage::{Message, QueryStore};
use tracing::{error, info, instrument};

use crate::config::PipelineConfig;
use crate::pipeline::AdminPipeline;
use crate::preview;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatMode {
    #[default]
    Normal,
    Admin,
}

impl ChatMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::Normal => "normal",
            ChatMode::Admin => "admin",
        }
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ChatMode::Normal),
            "admin" => Ok(ChatMode::Admin),
            other => anyhow::bail!("unknown chat mode: {}", other),
        }
    }
}

/// Reply to one chat request. `sql` is set only for a successful admin answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub message: String,
    pub sql: Option<String>,
    pub mode: ChatMode,
}

pub struct ChatService {
    llm: Arc<dyn LlmClient>,
    pipeline: AdminPipeline,
    system_prompt: String,
    history_limit: usize,
}

impl ChatService {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn QueryStore>,
        config: PipelineConfig,
        system_prompt: impl Into<String>,
    ) -> Self {
        let pipeline = AdminPipeline::from_parts(llm.clone(), store, &config);
        Self {
            llm,
            pipeline,
            system_prompt: system_prompt.into(),
            history_limit: config.history_limit,
        }
    }

    /// Normal mode forwards `history` plus `text` to the LLM and may fail with the gateway
    /// error. Admin mode runs the pipeline, ignores `history`, and always returns a message.
    #[instrument(skip(self, text, history), fields(mode = %mode, history = history.len()))]
    pub async fn process(
        &self,
        text: &str,
        mode: ChatMode,
        history: &[Message],
    ) -> Result<ChatResponse> {
        match mode {
            ChatMode::Admin => {
                let outcome = self.pipeline.run_admin(text).await;
                Ok(ChatResponse {
                    message: outcome.message().to_string(),
                    sql: outcome.sql().map(str::to_string),
                    mode,
                })
            }
            ChatMode::Normal => {
                let message = self.chat(text, history).await?;
                Ok(ChatResponse {
                    message,
                    sql: None,
                    mode,
                })
            }
        }
    }

    async fn chat(&self, text: &str, history: &[Message]) -> Result<String> {
        let skip = history.len().saturating_sub(self.history_limit);
        let mut messages: Vec<ChatMessage> =
            history[skip..].iter().map(ChatMessage::from).collect();
        messages.push(ChatMessage::user(text.to_string()));

        info!(
            messages = messages.len(),
            text = %preview(text, 100),
            "Sending chat request"
        );

        self.llm
            .get_response(messages, &self.system_prompt)
            .await
            .map_err(|e| {
                error!(error = %e, "Error getting chat response");
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_mode_parse_and_display() {
        assert_eq!("admin".parse::<ChatMode>().unwrap(), ChatMode::Admin);
        assert_eq!(" Normal ".parse::<ChatMode>().unwrap(), ChatMode::Normal);
        assert!("root".parse::<ChatMode>().is_err());
        assert_eq!(ChatMode::Admin.to_string(), "admin");
        assert_eq!(ChatMode::default(), ChatMode::Normal);
    }
}
