//! SQLite connection pools for the storage crate.
//!
//! The writer pool serves appends, history reads and soft deletes. Ad-hoc queries go through
//! [`SqlitePoolManager::reader`]: for file databases that is a separate pool opened with the
//! read-only flag; in-memory databases only exist inside one pool, so the writer pool is reused
//! and read-only access is enforced per connection with `PRAGMA query_only`.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Manages the writer pool and the read-only pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
    reader: SqlitePool,
    in_memory: bool,
}

impl SqlitePoolManager {
    /// Creates pools for the given database URL (`sqlite://path.db` or `sqlite::memory:`).
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let in_memory = is_in_memory(database_url);
        info!(database_url = %database_url, in_memory, "Initializing SQLite pool");

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        if in_memory {
            // One long-lived connection keeps the shared in-memory database alive.
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;
            return Ok(Self {
                reader: pool.clone(),
                pool,
                in_memory,
            });
        }

        let pool = SqlitePoolOptions::new().connect_with(options.clone()).await?;
        let reader = SqlitePoolOptions::new()
            .connect_lazy_with(options.create_if_missing(false).read_only(true));

        Ok(Self {
            pool,
            reader,
            in_memory,
        })
    }

    /// Returns the read-write pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the pool used for untrusted read queries.
    pub fn reader(&self) -> &SqlitePool {
        &self.reader
    }

    /// True when the database lives in the single connection of the writer pool.
    pub fn is_in_memory(&self) -> bool {
        self.in_memory
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
