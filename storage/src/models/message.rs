//! Message model for the conversation log.
//!
//! Maps to the `messages` table. `content_length` is always derived from `content`;
//! the store recomputes it on every append.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use prompt::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Identity used for synthetic turns built by the pipeline and the web proxy.
pub const SYSTEM_USER_ID: i64 = 0;

/// Display name of pipeline-originated turns.
pub const SYSTEM_USERNAME: &str = "system";

/// Display name of turns that arrive through the web chat / CLI proxy.
pub const WEB_USERNAME: &str = "web_user";

/// Speaker of a stored turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(StorageError::Decode(format!("unknown message role: {}", other))),
        }
    }
}

/// A single turn in a dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Assigned by the store on insert.
    pub id: Option<i64>,
    pub user_id: i64,
    pub chat_id: i64,
    pub role: MessageRole,
    pub content: String,
    /// Character count of `content`.
    pub content_length: i64,
    pub username: String,
    /// Assigned by the store on insert.
    pub created_at: Option<DateTime<Utc>>,
    pub is_deleted: bool,
}

impl Message {
    /// Creates an unsaved message; `content_length` is derived from `content`.
    pub fn new(
        user_id: i64,
        chat_id: i64,
        role: MessageRole,
        content: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: None,
            user_id,
            chat_id,
            role,
            content_length: content_length(&content),
            content,
            username: username.into(),
            created_at: None,
            is_deleted: false,
        }
    }

    pub fn user(
        user_id: i64,
        chat_id: i64,
        content: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self::new(user_id, chat_id, MessageRole::User, content, username)
    }

    pub fn assistant(
        user_id: i64,
        chat_id: i64,
        content: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self::new(user_id, chat_id, MessageRole::Assistant, content, username)
    }

    /// Synthetic single user turn attributed to the system identity.
    pub fn system_prompt(content: impl Into<String>) -> Self {
        Self::user(SYSTEM_USER_ID, SYSTEM_USER_ID, content, SYSTEM_USERNAME)
    }
}

pub(crate) fn content_length(content: &str) -> i64 {
    content.chars().count() as i64
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        match message.role {
            MessageRole::User => ChatMessage::user(message.content.clone()),
            MessageRole::Assistant => ChatMessage::assistant(message.content.clone()),
        }
    }
}
