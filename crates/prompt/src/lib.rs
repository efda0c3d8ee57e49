//! # Prompt
//!
//! Chat message shape sent to the language model and the fixed instructional templates
//! used by the chat bot and the text-to-SQL pipeline.
//!
//! ## Templates
//!
//! - [`text_to_sql_prompt`]: question → SQL generation request (schema of `messages` embedded)
//! - [`interpret_results_prompt`]: question + SQL + serialized rows → explanation request
//! - [`CHAT_SYSTEM_PROMPT`], [`SQL_EXPERT_DIRECTIVE`], [`DATA_ANALYST_DIRECTIVE`]: system directives
//!
//! ## External interactions
//!
//! - **AI models**: Output is sent to OpenAI-compatible chat completion APIs.

mod templates;

pub use templates::{
    interpret_results_prompt, text_to_sql_prompt, CHAT_SYSTEM_PROMPT, DATA_ANALYST_DIRECTIVE,
    MESSAGES_SCHEMA, SQL_EXPERT_DIRECTIVE,
};

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one element of the OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}
