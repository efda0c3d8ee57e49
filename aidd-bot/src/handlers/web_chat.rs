//! One-shot chat requests under the web-proxy identity (`user_id` 0, `web_user`).
//!
//! Normal mode keeps a history per chat id like the Telegram handler does. Admin mode goes
//! through the text-to-SQL pipeline and is not persisted.

use std::sync::Arc;

use anyhow::Result;
use storage::{Message as StoredMessage, MessageStore, SYSTEM_USER_ID, WEB_USERNAME};
use text_to_sql::{ChatMode, ChatResponse, ChatService};
use tracing::{info, instrument};

pub const DEFAULT_WEB_CHAT_ID: i64 = 1;

pub struct WebChat {
    store: Arc<dyn MessageStore>,
    chat_service: Arc<ChatService>,
    history_limit: usize,
}

impl WebChat {
    pub fn new(
        store: Arc<dyn MessageStore>,
        chat_service: Arc<ChatService>,
        history_limit: usize,
    ) -> Self {
        Self {
            store,
            chat_service,
            history_limit,
        }
    }

    /// Admin mode always yields a response; normal mode fails if the LLM request fails,
    /// in which case only the user turn has been stored.
    #[instrument(skip(self, text))]
    pub async fn process(&self, chat_id: i64, text: &str, mode: ChatMode) -> Result<ChatResponse> {
        if mode == ChatMode::Admin {
            return self.chat_service.process(text, mode, &[]).await;
        }

        let user_id = SYSTEM_USER_ID;
        let history = self
            .store
            .history(chat_id, user_id, self.history_limit)
            .await?;
        self.store
            .append(StoredMessage::user(user_id, chat_id, text, WEB_USERNAME))
            .await?;

        let response = self.chat_service.process(text, mode, &history).await?;

        self.store
            .append(StoredMessage::assistant(
                user_id,
                chat_id,
                &response.message,
                WEB_USERNAME,
            ))
            .await?;
        info!(chat_id, history = history.len(), "Web chat turn saved");

        Ok(response)
    }
}
