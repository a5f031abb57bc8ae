//! services/web/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of
//! the `EntryStore` port from the `core` crate. It handles all interactions
//! with the SQLite database using `sqlx`.

use async_trait::async_trait;
use miniblog_core::domain::Entry;
use miniblog_core::ports::{EntryStore, PortError, PortResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, SqlitePool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `EntryStore` port.
///
/// Every operation acquires a connection from the pool and returns it when
/// the handle drops, on success and error paths alike, so each request's
/// connection use is scoped to that request.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new `SqliteStore` over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool against the configured database URL.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Applies the bundled schema migrations. Idempotent. Invoked by the
    /// `init-db` administrative command and by tests, never during request
    /// handling.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct EntryRecord {
    id: i64,
    title: String,
    text: String,
}

impl EntryRecord {
    fn to_domain(self) -> Entry {
        Entry {
            id: self.id,
            title: self.title,
            text: self.text,
        }
    }
}

//=========================================================================================
// `EntryStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl EntryStore for SqliteStore {
    async fn list_entries(&self) -> PortResult<Vec<Entry>> {
        let records = sqlx::query_as::<_, EntryRecord>(
            "SELECT id, title, text FROM entries ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unavailable(e.to_string()))?;

        Ok(records.into_iter().map(EntryRecord::to_domain).collect())
    }

    async fn add_entry(&self, title: &str, text: &str) -> PortResult<()> {
        // Parameterized statement; title and text stay opaque strings.
        sqlx::query("INSERT INTO entries (title, text) VALUES (?, ?)")
            .bind(title)
            .bind(text)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
