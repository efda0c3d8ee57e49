//! Telegram chat handler: bot commands and normal-mode conversation with persisted history.

use std::sync::Arc;

use async_trait::async_trait;
use storage::{Message as StoredMessage, MessageStore};
use text_to_sql::{ChatMode, ChatService};
use tracing::{error, info, instrument, warn};

use crate::core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};

pub const START_TEXT: &str = "Hi! I'm an AI assistant. Send me a message and I'll answer.\n\
Use /help to see the available commands.";

pub const HELP_TEXT: &str = "Commands:\n\
/start - greeting\n\
/help - this help\n\
/clear - forget our conversation history\n\n\
Any other text is answered by the assistant, which remembers recent messages.";

pub const FAILURE_TEXT: &str =
    "Sorry, I couldn't get a response right now. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Clear,
}

impl Command {
    /// Parses a leading `/command` (optionally `/command@bot_name`).
    /// `Ok(None)` for plain text; an error for an unknown command.
    pub fn parse(text: &str) -> std::result::Result<Option<Self>, HandlerError> {
        let Some(rest) = text.trim_start().strip_prefix('/') else {
            return Ok(None);
        };
        let word = rest.split_whitespace().next().unwrap_or("");
        let name = word.split('@').next().unwrap_or("");
        match name.to_ascii_lowercase().as_str() {
            "start" => Ok(Some(Command::Start)),
            "help" => Ok(Some(Command::Help)),
            "clear" => Ok(Some(Command::Clear)),
            _ => Err(HandlerError::InvalidCommand(word.to_string())),
        }
    }
}

pub struct ChatHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn MessageStore>,
    chat_service: Arc<ChatService>,
    history_limit: usize,
}

impl ChatHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        store: Arc<dyn MessageStore>,
        chat_service: Arc<ChatService>,
        history_limit: usize,
    ) -> Self {
        Self {
            bot,
            store,
            chat_service,
            history_limit,
        }
    }

    async fn reply(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        self.bot.reply_to(message, text).await?;
        Ok(HandlerResponse::Reply(text.to_string()))
    }

    async fn clear(&self, message: &Message) -> Result<HandlerResponse> {
        let deleted = self
            .store
            .soft_delete(message.chat.id, message.user.id)
            .await?;
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            deleted,
            "step: history cleared"
        );
        self.reply(message, "Conversation history cleared.").await
    }

    /// Prior history is read before the user turn is written, so the model sees it once.
    async fn converse(&self, message: &Message, text: &str) -> Result<HandlerResponse> {
        let (chat_id, user_id) = (message.chat.id, message.user.id);
        let username = message.user.display_name();

        let history = self
            .store
            .history(chat_id, user_id, self.history_limit)
            .await?;

        self.store
            .append(StoredMessage::user(user_id, chat_id, text, &username))
            .await?;
        info!(
            user_id,
            chat_id,
            history = history.len(),
            "step: user turn saved, requesting reply"
        );

        let response = match self
            .chat_service
            .process(text, ChatMode::Normal, &history)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, user_id, chat_id, "LLM request failed");
                return self.reply(message, FAILURE_TEXT).await;
            }
        };

        self.store
            .append(StoredMessage::assistant(
                user_id,
                chat_id,
                &response.message,
                &username,
            ))
            .await?;
        info!(user_id, chat_id, "step: assistant turn saved");

        self.reply(message, &response.message).await
    }
}

#[async_trait]
impl Handler for ChatHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        match Command::parse(text) {
            Ok(Some(Command::Start)) => self.reply(message, START_TEXT).await,
            Ok(Some(Command::Help)) => self.reply(message, HELP_TEXT).await,
            Ok(Some(Command::Clear)) => self.clear(message).await,
            Ok(None) => self.converse(message, text).await,
            Err(e) => {
                warn!(error = %e, "Unknown command");
                self.reply(message, &format!("{}\n\n{}", e, HELP_TEXT)).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("/start").unwrap(), Some(Command::Start));
        assert_eq!(Command::parse("/help now").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("/CLEAR@aidd_bot").unwrap(), Some(Command::Clear));
        assert_eq!(Command::parse("hello /start").unwrap(), None);
        assert!(matches!(
            Command::parse("/sql select 1"),
            Err(HandlerError::InvalidCommand(cmd)) if cmd == "sql"
        ));
    }
}
