/**
 * API Token Management
 *
 * This module handles issuance and lookup of the opaque API keys used for
 * request authentication.
 *
 * # Semantics
 *
 * Each user has at most one token (`auth_tokens.user_id` is unique).
 * Signup and signin both go through `get_or_create_token`, so repeated
 * signins return the same key. The get-or-create is race-safe: the insert
 * uses `ON CONFLICT .. DO NOTHING` and then re-reads, so two concurrent
 * signins for one user cannot produce two rows.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::users::User;

/// Token row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    /// Opaque token key presented in the Authorization header
    pub key: String,
    /// Owning user
    pub user_id: i64,
    /// Issuance timestamp
    pub created_at: DateTime<Utc>,
}

/// Get the user's API token, creating one if none exists
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `user_id` - User the token belongs to
///
/// # Returns
/// The user's token (existing or freshly issued)
pub async fn get_or_create_token(pool: &SqlitePool, user_id: i64) -> Result<AuthToken, sqlx::Error> {
    let key = Uuid::new_v4().simple().to_string();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO auth_tokens (key, user_id, created_at)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(&key)
    .bind(user_id)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query_as::<_, AuthToken>(
        r#"
        SELECT key, user_id, created_at
        FROM auth_tokens
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Resolve a token key to its user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `key` - Token key from the Authorization header
///
/// # Returns
/// The authenticated user, or `None` if the key is unknown
pub async fn lookup_token_user(pool: &SqlitePool, key: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.username, u.email, u.password_hash, u.created_at, u.updated_at
        FROM users u
        JOIN auth_tokens t ON t.user_id = u.id
        WHERE t.key = ?
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await
}
