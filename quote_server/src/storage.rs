//! Append-only persistence of served quotes.
//!
//! The `QuoteSink` trait is the seam the quote service writes through; the
//! production implementation is `SqliteStore`, a `sqlx` SQLite pool opened once
//! at start-up and shared by every request task. SQLite serializes the physical
//! writes, so appends take no lock of their own.
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;
use quote_common::{Deadline, Quote, QuoteError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bid TEXT NOT NULL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Row created by a successful append.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PersistedQuoteRecord {
    /// Storage-assigned, monotonically increasing id.
    pub id: i64,
    /// Bid copied from the appended quote.
    pub bid: String,
    /// Storage-assigned creation time (UTC).
    #[sqlx(rename = "timestamp")]
    pub recorded_at: NaiveDateTime,
}

/// Durable, append-only destination for fetched quotes.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    /// Insert the quote's `bid` exactly once, bounded by `deadline`.
    ///
    /// Deadline expiry yields `QuoteError::Timeout`; any other failure yields
    /// `QuoteError::Storage`.
    async fn append(&self, quote: &Quote, deadline: &Deadline) -> Result<PersistedQuoteRecord>;
}

/// SQLite-backed `QuoteSink`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the database at `database_url` (created if missing) and make sure
    /// the `quotes` table exists. Safe to call on every start.
    pub async fn initialize(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(storage_error)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .map_err(storage_error)?;

        Ok(Self { pool })
    }

    /// Close every pooled connection. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl QuoteSink for SqliteStore {
    async fn append(&self, quote: &Quote, deadline: &Deadline) -> Result<PersistedQuoteRecord> {
        debug!("INSERT bid={} (budget {:?})", quote.bid, deadline.budget());
        deadline
            .run(async {
                sqlx::query_as::<_, PersistedQuoteRecord>(
                    "INSERT INTO quotes (bid) VALUES (?) RETURNING id, bid, timestamp",
                )
                .bind(&quote.bid)
                .fetch_one(&self.pool)
                .await
                .map_err(storage_error)
            })
            .await
    }
}

fn storage_error(err: sqlx::Error) -> QuoteError {
    QuoteError::Storage(err.to_string())
}
