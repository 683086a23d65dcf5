/**
 * Signup Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username format, email format, and password length
 * 2. Check if the username or email is already taken
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Issue an API token
 * 6. Return the created user and token
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 * - The token is an opaque random key; possession of it authenticates
 *   subsequent requests
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::auth::handlers::types::{SignupRequest, SignupResponse, UserResponse};
use crate::auth::tokens::get_or_create_token;
use crate::auth::users::{create_user, get_user_by_email, get_user_by_username};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    // Rest can be alphanumeric or underscore
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a storage error is a uniqueness-constraint violation
///
/// The pre-insert lookups race against concurrent signups for the same
/// username or email; the loser hits the users table's UNIQUE constraint
/// and must still surface as a 409, not a 500.
fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Sign up handler
///
/// Processes user registration requests: validates the input, creates the
/// user account, and returns an API token for immediate authentication.
///
/// # Errors
///
/// * `400 Bad Request` - invalid username, email format, or password too short
/// * `409 Conflict` - username or email already registered
/// * `500 Internal Server Error` - hashing or persistence failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    tracing::info!(
        "Signup request for username: {}, email: {}",
        request.username,
        request.email
    );

    if !is_valid_username(&request.username) {
        return Err(ApiError::validation(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    // Basic email check
    if !request.email.contains('@') {
        return Err(ApiError::validation("Invalid email format"));
    }

    if request.password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }

    if get_user_by_username(&state.db, &request.username)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Username already taken"));
    }

    if get_user_by_email(&state.db, &request.email).await?.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::internal("Server error")
    })?;

    let user = create_user(&state.db, &request.username, &request.email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::conflict("Username or email already registered")
            } else {
                ApiError::from(e)
            }
        })?;
    let token = get_or_create_token(&state.db, user.id).await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.email);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: UserResponse::from(user),
            token: token.key,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::SqlitePool;
    use std::str::FromStr;

    async fn test_pool() -> SqlitePool {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        sqlx::migrate!().run(&pool).await.unwrap();
        pool
    }

    #[test]
    fn test_valid_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_b"));
        assert!(is_valid_username("a23"));
    }

    #[test]
    fn test_invalid_usernames() {
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("1alice"));
        assert!(!is_valid_username("_alice"));
        assert!(!is_valid_username("alice bob"));
        assert!(!is_valid_username(&"a".repeat(31)));
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_unique_violation() {
        let pool = test_pool().await;
        create_user(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap();

        // A concurrent signup that slips past the pre-insert lookups fails
        // on the UNIQUE constraint; that error must classify as a conflict.
        let error = create_user(&pool, "alice", "alice@example.com", "hash")
            .await
            .unwrap_err();
        assert!(is_unique_violation(&error));
    }

    #[test]
    fn test_non_constraint_error_is_not_unique_violation() {
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }
}
