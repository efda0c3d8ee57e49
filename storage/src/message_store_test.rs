//! Unit tests for SqliteMessageStore.
//!
//! Covers append bookkeeping, read-only query mapping and query_only reset.

use crate::message_store::SqliteMessageStore;
use crate::models::{Message, MessageRole};
use crate::store::{MessageStore, QueryStore};
use serde_json::json;

async fn memory_store() -> SqliteMessageStore {
    SqliteMessageStore::new("sqlite::memory:")
        .await
        .expect("Failed to create store")
}

#[tokio::test]
async fn test_append_assigns_id_and_created_at() {
    let store = memory_store().await;

    let first = store
        .append(Message::user(1, 10, "hello", "alice"))
        .await
        .expect("Failed to append");
    let second = store
        .append(Message::assistant(1, 10, "hi there", "alice"))
        .await
        .expect("Failed to append");

    assert!(first.id.is_some());
    assert!(first.created_at.is_some());
    assert!(second.id > first.id);
    assert_eq!(second.role, MessageRole::Assistant);
}

#[tokio::test]
async fn test_append_recomputes_content_length() {
    let store = memory_store().await;

    let mut msg = Message::user(1, 10, "четыре", "alice");
    msg.content_length = 999;
    msg.is_deleted = true;

    let saved = store.append(msg).await.expect("Failed to append");
    assert_eq!(saved.content_length, 6);
    assert!(!saved.is_deleted);

    let history = store.history(10, 1, 10).await.expect("Failed to read");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content_length, 6);
}

#[tokio::test]
async fn test_query_readonly_maps_columns_in_order() {
    let store = memory_store().await;
    store
        .append(Message::user(7, 70, "one", "bob"))
        .await
        .unwrap();
    store
        .append(Message::user(7, 70, "two", "bob"))
        .await
        .unwrap();

    let rows = store
        .query_readonly(
            "SELECT user_id, COUNT(*) AS total, AVG(content_length) AS avg_len, NULL AS nothing \
             FROM messages GROUP BY user_id",
        )
        .await
        .expect("Failed to query");

    assert_eq!(rows.len(), 1);
    let keys: Vec<&String> = rows[0].keys().collect();
    assert_eq!(keys, vec!["user_id", "total", "avg_len", "nothing"]);
    assert_eq!(rows[0]["user_id"], json!(7));
    assert_eq!(rows[0]["total"], json!(2));
    assert_eq!(rows[0]["avg_len"], json!(3.0));
    assert_eq!(rows[0]["nothing"], json!(null));
}

#[tokio::test]
async fn test_query_readonly_renders_text_dates() {
    let store = memory_store().await;
    store
        .append(Message::user(1, 1, "x", "carol"))
        .await
        .unwrap();

    let rows = store
        .query_readonly("SELECT created_at, date(created_at) AS day FROM messages")
        .await
        .expect("Failed to query");

    assert!(rows[0]["created_at"].is_string());
    assert_eq!(rows[0]["day"].as_str().map(str::len), Some(10));
}

#[tokio::test]
async fn test_query_readonly_rejects_writes_and_keeps_writer_usable() {
    let store = memory_store().await;

    let result = store
        .query_readonly(
            "INSERT INTO messages (user_id, chat_id, role, content, content_length, created_at) \
             VALUES (1, 1, 'user', 'x', 1, '2026-01-01')",
        )
        .await;
    assert!(result.is_err());

    // The connection must be back in read-write mode for normal appends.
    store
        .append(Message::user(1, 1, "after", "dave"))
        .await
        .expect("append after rejected write");
    let history = store.history(1, 1, 10).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "after");
}

#[tokio::test]
async fn test_query_readonly_propagates_syntax_errors() {
    let store = memory_store().await;
    let result = store.query_readonly("SELEC nonsense").await;
    assert!(result.is_err());
}

/// **Test: failing read-only queries never cost an in-memory store its data.**
///
/// **Setup:** In-memory store with one stored message.
/// **Action:** A mix of rejected writes, bad SQL and valid reads through `query_readonly`.
/// **Expected:** The schema and stored message survive and appends still succeed.
#[tokio::test]
async fn test_query_readonly_failures_keep_in_memory_database() {
    let store = memory_store().await;
    store
        .append(Message::user(3, 30, "kept", "erin"))
        .await
        .unwrap();

    for sql in [
        "DELETE FROM messages",
        "SELEC nonsense",
        "SELECT * FROM no_such_table",
        "DROP TABLE messages",
        "SELECT COUNT(*) AS n FROM messages",
    ] {
        let _ = store.query_readonly(sql).await;
    }

    let rows = store
        .query_readonly("SELECT content FROM messages")
        .await
        .expect("schema survives");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["content"], json!("kept"));

    store
        .append(Message::assistant(3, 30, "still writable", "erin"))
        .await
        .unwrap();
    assert_eq!(store.history(30, 3, 10).await.unwrap().len(), 2);
}
