//! Persistence models.

mod message;
mod message_stats;

pub(crate) use message::content_length;
pub use message::{Message, MessageRole, SYSTEM_USERNAME, SYSTEM_USER_ID, WEB_USERNAME};
pub use message_stats::{DailyActivity, MessageStats};
