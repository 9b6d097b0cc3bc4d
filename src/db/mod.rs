//! SQLite-backed credential and page store

pub mod pages;
pub mod seed;
pub mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite, Transaction};
use std::str::FromStr;

use crate::error::Result;

/// Connection pool plus schema management
#[derive(Clone, Debug)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open a pool for the given sqlx URL.
    ///
    /// In-memory databases live inside a single connection, so their pool is
    /// pinned to exactly one connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .connect_with(options)
                .await?
        };

        tracing::info!("Connected to database {}", url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Start the transaction a single request's writes run in
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Create tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                role TEXT NOT NULL,
                password_hash TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                data TEXT NOT NULL,
                creator_id INTEGER NOT NULL REFERENCES users(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("Database schema ready");
        Ok(())
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url_detection() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url("sqlite://file:wiki?mode=memory&cache=shared"));
        assert!(!is_memory_url("sqlite://wiki.sqlite?mode=rwc"));
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.init_schema().await.unwrap();
        db.init_schema().await.unwrap();
    }
}
