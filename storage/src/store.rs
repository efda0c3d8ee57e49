//! Store traits. Handlers and the text-to-SQL pipeline depend on these, not on SQLite directly.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{DailyActivity, Message, MessageStats};
use crate::row::Row;

/// Append-only conversation log keyed by (chat_id, user_id).
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a message. The store assigns `id` and `created_at`, recomputes
    /// `content_length` and stores the row as active.
    async fn append(&self, message: Message) -> Result<Message, StorageError>;

    /// Most recent `limit` active messages for the pair, returned oldest-first.
    async fn history(
        &self,
        chat_id: i64,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<Message>, StorageError>;

    /// Marks all active messages of the pair as deleted. Returns the number of rows flipped.
    async fn soft_delete(&self, chat_id: i64, user_id: i64) -> Result<u64, StorageError>;

    async fn stats(&self) -> Result<MessageStats, StorageError>;

    /// Per-day message and active-user counts for the last `days` days, oldest day first.
    async fn daily_activity(&self, days: u32) -> Result<Vec<DailyActivity>, StorageError>;
}

/// Runs ad-hoc, untrusted SQL with read-only access.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Executes `sql` once and returns every row as an ordered column → value map.
    async fn query_readonly(&self, sql: &str) -> Result<Vec<Row>, StorageError>;
}
