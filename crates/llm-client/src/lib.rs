//! # LLM client abstraction
//!
//! Defines the [`LlmClient`] trait (the language model gateway) and an OpenAI-compatible
//! implementation. Callers hand over an ordered list of prior messages plus a system directive
//! and get generated text back; no retry or backoff happens at this layer.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use prompt::{ChatMessage, MessageRole};

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, LlmConfig};
pub use openai_llm::OpenAILlmClient;

/// LLM gateway: request a completion for a list of messages.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the model reply for `messages` (in order) under the given system directive.
    async fn get_response(&self, messages: Vec<ChatMessage>, system_prompt: &str)
        -> Result<String>;
}

/// Converts a single [`ChatMessage`] into OpenAI API message format.
fn chat_message_to_openai(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let content = msg.content.clone();
    let openai_msg: ChatCompletionRequestMessage = match msg.role {
        MessageRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()?
            .into(),
        MessageRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()?
            .into(),
    };
    Ok(openai_msg)
}

/// System directive first, then the conversation in the given order.
pub(crate) fn build_request_messages(
    system_prompt: &str,
    messages: &[ChatMessage],
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(chat_message_to_openai(&ChatMessage::system(system_prompt))?);
    for msg in messages {
        out.push(chat_message_to_openai(msg)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_messages_puts_system_first() {
        let history = vec![
            ChatMessage::user("q1"),
            ChatMessage::assistant("a1"),
            ChatMessage::user("q2"),
        ];
        let out = build_request_messages("be brief", &history).unwrap();
        assert_eq!(out.len(), 4);
        assert!(matches!(out[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(out[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(out[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(out[3], ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_build_request_messages_with_empty_history() {
        let out = build_request_messages("directive", &[]).unwrap();
        assert_eq!(out.len(), 1);
    }
}
