//! Test database helpers
//!
//! Provides an in-memory SQLite database with migrations applied. The pool
//! is capped at a single connection so every query sees the same in-memory
//! database.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// A migrated in-memory database for one test
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Create a fresh database and run all migrations
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("invalid sqlite options")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("failed to open in-memory database");

        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("failed to run migrations");

        Self { pool }
    }

    /// Access the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
