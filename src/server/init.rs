/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * loading the database, creating the application state, and assembling the
 * router.
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::routes::create_router;
use crate::server::config::load_database;
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// Loads the database pool from configuration, runs migrations, and builds
/// the router with all routes and middleware attached.
///
/// # Errors
///
/// Returns the database error if the pool cannot be created or migrations
/// fail.
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing ResearchPath backend server");

    let pool = load_database().await?;

    Ok(create_app_with_pool(pool))
}

/// Assemble the application around an existing pool
///
/// Used directly by tests, which supply a migrated in-memory pool.
pub fn create_app_with_pool(pool: SqlitePool) -> Router {
    create_router(AppState::new(pool))
}
