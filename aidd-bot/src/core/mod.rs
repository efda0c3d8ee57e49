//! Core types and traits: [`Bot`], [`Handler`], message and user types, errors and tracing setup.
//! Transport-agnostic; the telegram module adapts teloxide onto these.

mod bot;
mod error;
mod logger;
mod types;

pub use bot::Bot;
pub use error::{BotError, HandlerError, Result};
pub use logger::{init_cli_tracing, init_tracing};
pub use types::{Chat, Handler, HandlerResponse, Message, ToCoreMessage, ToCoreUser, User};
