/**
 * Server Configuration
 *
 * This module handles loading the database configuration and creating the
 * connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible defaults
 * for local development:
 *
 * - `DATABASE_URL` - SQLite database URL (default: `sqlite://researchpath.db`)
 * - `SERVER_PORT`  - HTTP listen port, read in `main` (default: 3000)
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default database URL for local development.
const DEFAULT_DATABASE_URL: &str = "sqlite://researchpath.db";

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from the environment (defaulting to a local file)
/// 2. Creates a SQLite connection pool with foreign keys enabled
/// 3. Runs database migrations
///
/// Foreign key enforcement must be switched on per connection for the
/// schema's `ON DELETE CASCADE` clauses to take effect.
///
/// # Errors
///
/// Returns the underlying sqlx error if the pool cannot be created or
/// migrations fail. The server cannot run without its database, so startup
/// aborts on error.
pub async fn load_database() -> Result<SqlitePool, sqlx::Error> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
