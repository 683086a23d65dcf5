/**
 * Signin Handler
 *
 * This module implements the credential-check handler for
 * POST /api/auth/signin.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Get or create the user's API token
 * 4. Return the token and user identity
 *
 * # Security
 *
 * - Invalid email and invalid password return the same 401 to prevent
 *   user enumeration
 * - Password verification uses bcrypt's constant-time comparison
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::auth::handlers::types::{SigninRequest, SigninResponse};
use crate::auth::tokens::get_or_create_token;
use crate::auth::users::get_user_by_email;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Sign in handler
///
/// Verifies the email and password and returns the user's API token.
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or incorrect password
/// * `500 Internal Server Error` - database or verification failure
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    tracing::info!("Signin request for: {}", request.email);

    let user = get_user_by_email(&state.db, &request.email)
        .await?
        .ok_or_else(|| ApiError::authentication("Invalid credentials"))?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        ApiError::internal("Server error")
    })?;

    if !valid {
        return Err(ApiError::authentication("Invalid credentials"));
    }

    let token = get_or_create_token(&state.db, user.id).await?;

    tracing::info!("User signed in successfully: {} ({})", user.username, user.email);

    Ok(Json(SigninResponse {
        token: token.key,
        user_id: user.id,
        email: user.email,
    }))
}
