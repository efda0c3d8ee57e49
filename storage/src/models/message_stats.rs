//! Aggregate statistics for the dashboard and the `stats` command.
//!
//! Returned by MessageStore::stats and MessageStore::daily_activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageStats {
    pub total_messages: i64,
    pub user_messages: i64,
    pub assistant_messages: i64,
    /// Soft-deleted rows; still counted in `total_messages`.
    pub deleted_messages: i64,
    pub unique_users: i64,
    pub unique_chats: i64,
    pub first_message: Option<DateTime<Utc>>,
    pub last_message: Option<DateTime<Utc>>,
}

/// Message volume for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_messages: i64,
    pub active_users: i64,
}
