//! SQLite-backed conversation store.
//!
//! Uses SqlitePoolManager and the models (Message, MessageStats, DailyActivity).
//! External: SQLite via sqlx; callers use append/history/soft_delete/query_readonly.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;
use tracing::{info, instrument, warn};

use crate::error::StorageError;
use crate::models::{content_length, DailyActivity, Message, MessageStats};
use crate::row::{row_to_json, Row};
use crate::sqlite_pool::SqlitePoolManager;
use crate::store::{MessageStore, QueryStore};

const MESSAGE_COLUMNS: &str =
    "id, user_id, chat_id, role, content, content_length, username, created_at, is_deleted";

#[derive(Clone)]
pub struct SqliteMessageStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteMessageStore {
    /// Opens (or creates) the database and ensures the schema exists.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                chat_id INTEGER NOT NULL,
                role TEXT NOT NULL CHECK (role IN ('user', 'assistant')),
                content TEXT NOT NULL,
                content_length INTEGER NOT NULL,
                username TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                is_deleted BOOLEAN NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_chat_user ON messages(chat_id, user_id, is_deleted);
            CREATE INDEX IF NOT EXISTS idx_messages_created_at ON messages(created_at);
            CREATE INDEX IF NOT EXISTS idx_messages_role ON messages(role);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

fn message_from_row(row: &SqliteRow) -> Result<Message, StorageError> {
    let role: String = row.try_get("role")?;
    Ok(Message {
        id: Some(row.try_get("id")?),
        user_id: row.try_get("user_id")?,
        chat_id: row.try_get("chat_id")?,
        role: role.parse()?,
        content: row.try_get("content")?,
        content_length: row.try_get("content_length")?,
        username: row.try_get("username")?,
        created_at: Some(row.try_get("created_at")?),
        is_deleted: row.try_get("is_deleted")?,
    })
}

fn limit_to_i64(limit: usize) -> Result<i64, StorageError> {
    i64::try_from(limit)
        .map_err(|_| StorageError::InvalidArgument(format!("history limit too large: {}", limit)))
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    #[instrument(skip(self, message), fields(chat_id = message.chat_id, user_id = message.user_id))]
    async fn append(&self, message: Message) -> Result<Message, StorageError> {
        let pool = self.pool_manager.pool();
        let created_at = Utc::now();
        let length = content_length(&message.content);

        let result = sqlx::query(
            r#"
            INSERT INTO messages (user_id, chat_id, role, content, content_length, username, created_at, is_deleted)
            VALUES (?, ?, ?, ?, ?, ?, ?, 0)
            "#,
        )
        .bind(message.user_id)
        .bind(message.chat_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(length)
        .bind(&message.username)
        .bind(created_at)
        .execute(pool)
        .await?;

        let saved = Message {
            id: Some(result.last_insert_rowid()),
            content_length: length,
            created_at: Some(created_at),
            is_deleted: false,
            ..message
        };

        info!(
            id = saved.id,
            role = %saved.role,
            content_length = saved.content_length,
            "Message saved"
        );
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn history(
        &self,
        chat_id: i64,
        user_id: i64,
        limit: usize,
    ) -> Result<Vec<Message>, StorageError> {
        let pool = self.pool_manager.pool();
        let sql = format!(
            "SELECT {} FROM messages \
             WHERE chat_id = ? AND user_id = ? AND is_deleted = 0 \
             ORDER BY created_at DESC, id DESC LIMIT ?",
            MESSAGE_COLUMNS
        );

        let rows = sqlx::query(&sql)
            .bind(chat_id)
            .bind(user_id)
            .bind(limit_to_i64(limit)?)
            .fetch_all(pool)
            .await?;

        // Rows arrive newest-first; callers get them oldest-first.
        let messages = rows
            .iter()
            .rev()
            .map(message_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = messages.len(), "Retrieved history");
        Ok(messages)
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, chat_id: i64, user_id: i64) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            "UPDATE messages SET is_deleted = 1 WHERE chat_id = ? AND user_id = ? AND is_deleted = 0",
        )
        .bind(chat_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        info!(rows = result.rows_affected(), "History cleared (soft delete)");
        Ok(result.rows_affected())
    }

    async fn stats(&self) -> Result<MessageStats, StorageError> {
        let pool = self.pool_manager.pool();

        let (total, user, assistant, deleted, users, chats): (i64, i64, i64, i64, i64, i64) =
            sqlx::query_as(
                r#"
                SELECT
                    COUNT(*),
                    COALESCE(SUM(CASE WHEN role = 'user' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN role = 'assistant' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN is_deleted = 1 THEN 1 ELSE 0 END), 0),
                    COUNT(DISTINCT user_id),
                    COUNT(DISTINCT chat_id)
                FROM messages
                "#,
            )
            .fetch_one(pool)
            .await?;

        let (first_message, last_message): (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
            sqlx::query_as("SELECT MIN(created_at), MAX(created_at) FROM messages")
                .fetch_one(pool)
                .await?;

        Ok(MessageStats {
            total_messages: total,
            user_messages: user,
            assistant_messages: assistant,
            deleted_messages: deleted,
            unique_users: users,
            unique_chats: chats,
            first_message,
            last_message,
        })
    }

    async fn daily_activity(&self, days: u32) -> Result<Vec<DailyActivity>, StorageError> {
        if days == 0 {
            return Err(StorageError::InvalidArgument(
                "days must be at least 1".to_string(),
            ));
        }
        let pool = self.pool_manager.pool();
        let today = Utc::now().date_naive();
        let first_day = today - Duration::days(i64::from(days) - 1);
        let cutoff = first_day.format("%Y-%m-%d").to_string();

        let rows: Vec<(String, i64, i64)> = sqlx::query_as(
            r#"
            SELECT substr(created_at, 1, 10) AS day, COUNT(*), COUNT(DISTINCT user_id)
            FROM messages
            WHERE substr(created_at, 1, 10) >= ?
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(&cutoff)
        .fetch_all(pool)
        .await?;

        Ok(fill_days(first_day, today, rows))
    }
}

/// Expands sparse per-day counts into one entry per calendar day, zero-filled.
fn fill_days(
    first_day: NaiveDate,
    last_day: NaiveDate,
    counts: Vec<(String, i64, i64)>,
) -> Vec<DailyActivity> {
    let mut counts = counts.into_iter().peekable();
    let mut out = Vec::new();
    let mut day = first_day;
    while day <= last_day {
        let date = day.format("%Y-%m-%d").to_string();
        let (total_messages, active_users) = match counts.peek() {
            Some((d, total, users)) if *d == date => {
                let entry = (*total, *users);
                counts.next();
                entry
            }
            _ => (0, 0),
        };
        out.push(DailyActivity {
            date,
            total_messages,
            active_users,
        });
        day += Duration::days(1);
    }
    out
}

#[async_trait]
impl QueryStore for SqliteMessageStore {
    #[instrument(skip(self, sql))]
    async fn query_readonly(&self, sql: &str) -> Result<Vec<Row>, StorageError> {
        let mut conn = self.pool_manager.reader().acquire().await?;

        sqlx::query("PRAGMA query_only = ON")
            .execute(&mut *conn)
            .await?;
        let fetched = sqlx::query(sql).fetch_all(&mut *conn).await;
        let reset = sqlx::query("PRAGMA query_only = OFF")
            .execute(&mut *conn)
            .await;

        if let Err(e) = reset {
            if self.pool_manager.is_in_memory() {
                // The in-memory database lives on this connection; closing it loses all data.
                warn!(error = %e, "Failed to reset query_only on in-memory store");
                return Err(e.into());
            }
            // Never hand a query-only connection back to the writer pool.
            warn!(error = %e, "Failed to reset query_only; dropping connection");
            drop(conn.detach());
        }

        let rows = fetched?;
        info!(rows = rows.len(), "Read-only query executed");
        rows.iter().map(row_to_json).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_days_zero_fills_gaps() {
        let first = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        let filled = fill_days(
            first,
            last,
            vec![
                ("2026-01-02".to_string(), 5, 2),
                ("2026-01-04".to_string(), 1, 1),
            ],
        );
        let totals: Vec<i64> = filled.iter().map(|d| d.total_messages).collect();
        assert_eq!(totals, vec![0, 5, 0, 1]);
        assert_eq!(filled[0].date, "2026-01-01");
        assert_eq!(filled[1].active_users, 2);
    }
}
