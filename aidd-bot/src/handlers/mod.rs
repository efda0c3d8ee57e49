//! Request handlers: the Telegram chat handler and the web-proxy chat used by the CLI.

mod chat_handler;
mod web_chat;

pub use chat_handler::{ChatHandler, Command, FAILURE_TEXT, HELP_TEXT, START_TEXT};
pub use web_chat::{WebChat, DEFAULT_WEB_CHAT_ID};
