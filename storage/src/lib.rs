//! Storage crate: conversation log persistence and read-only query access.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – Message, MessageRole, MessageStats, DailyActivity
//! - [`store`] – MessageStore and QueryStore traits
//! - [`message_store`] – SqliteMessageStore (SQLite via sqlx)
//! - [`row`] – dynamic row to JSON conversion for ad-hoc queries
//! - [`sqlite_pool`] – SqlitePoolManager (writer + read-only pools)

mod error;
mod message_store;
mod models;
mod row;
mod sqlite_pool;
mod store;

#[cfg(test)]
mod message_store_test;

pub use error::StorageError;
pub use message_store::SqliteMessageStore;
pub use models::{
    DailyActivity, Message, MessageRole, MessageStats, SYSTEM_USERNAME, SYSTEM_USER_ID,
    WEB_USERNAME,
};
pub use row::Row;
pub use sqlite_pool::SqlitePoolManager;
pub use store::{MessageStore, QueryStore};
