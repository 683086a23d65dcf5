/**
 * Application State Management
 *
 * This module defines the application state shared across all request
 * handlers.
 *
 * # Thread Safety
 *
 * The only shared state is the sqlx connection pool, which is internally
 * reference-counted and safe to clone into each handler. There is no other
 * cross-request mutable state: every request maps to independent database
 * reads and writes, and the persistence layer's own concurrency control
 * (uniqueness constraints, transactions) covers the cross-request
 * invariants.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Central application state
///
/// Cloned into every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
