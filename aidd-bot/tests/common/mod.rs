//! Test doubles for aidd-bot integration tests: a recording [`Bot`] and a scripted LLM.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use aidd_bot::{AppServices, Bot, Chat, Message, Result, User};
use async_trait::async_trait;
use chrono::Utc;
use prompt::{ChatMessage, CHAT_SYSTEM_PROMPT};
use storage::SqliteMessageStore;
use text_to_sql::PipelineConfig;

/// Mock Bot that records every text it sends, keyed by chat id.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<(i64, String)>>,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_text(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, t)| t.clone())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push((chat.id, text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}

/// LLM stub replaying queued replies and recording requests.
#[derive(Default)]
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, error: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(error.to_string()));
        self
    }

    /// Messages of every request, in call order.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl llm_client::LlmClient for ScriptedLlm {
    async fn get_response(
        &self,
        messages: Vec<ChatMessage>,
        _system_prompt: &str,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(messages);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(error)) => Err(anyhow::anyhow!(error)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}

pub async fn services(llm: Arc<ScriptedLlm>) -> AppServices {
    let store = Arc::new(
        SqliteMessageStore::new("sqlite::memory:")
            .await
            .expect("in-memory store"),
    );
    AppServices::with_parts(store, llm, PipelineConfig::default(), CHAT_SYSTEM_PROMPT)
}

pub fn make_message(chat_id: i64, user_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: Some(format!("user{}", user_id)),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: chat_id,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}
