//! # Text-to-SQL pipeline
//!
//! Answers natural-language questions about the message store in three strictly sequential
//! stages, each attempted exactly once:
//!
//! 1. [`SqlGenerator`] asks the LLM for a SQL statement and strips code fences.
//! 2. [`SqlExecutor`] rejects anything but a single read query ([`check_read_only`]) and runs it
//!    through [`storage::QueryStore`] on a read-only connection.
//! 3. [`ResultInterpreter`] sends the question, the SQL and the (bounded) rows back to the LLM.
//!
//! [`AdminPipeline`] sequences the stages and reports failures as [`StageFailure`];
//! [`ChatService`] dispatches between normal chat and the admin pipeline and is the only
//! surface the bot and CLI talk to.

mod chat_service;
mod config;
mod error;
mod executor;
mod generator;
mod guard;
mod interpreter;
mod pipeline;

pub use chat_service::{ChatMode, ChatResponse, ChatService};
pub use config::{PipelineConfig, DEFAULT_HISTORY_LIMIT, DEFAULT_ROW_LIMIT};
pub use error::{PipelineError, Stage, StageFailure};
pub use executor::SqlExecutor;
pub use generator::{strip_code_fence, SqlGenerator};
pub use guard::check_read_only;
pub use interpreter::{format_rows, ResultInterpreter};
pub use pipeline::{AdminAnswer, AdminPipeline, PipelineOutcome};

/// First `max_chars` characters of `text`, for log lines.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
