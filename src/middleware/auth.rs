/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require user
 * authentication. It extracts the API key from the Authorization header,
 * resolves it against the token table, and provides the authenticated user
 * to handlers.
 *
 * # Header Format
 *
 * ```http
 * Authorization: Token <key>
 * ```
 */

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::tokens::lookup_token_user;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user data resolved from the API token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the API key from the Authorization header
/// 2. Resolves the key against the token table
/// 3. Attaches the authenticated user to request extensions for handlers
///
/// Returns 401 Unauthorized if the header is missing, malformed, or the
/// key is unknown.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::authentication("Missing Authorization header"))?;

    let key = auth_header
        .strip_prefix("Token ")
        .ok_or_else(|| ApiError::authentication("Invalid Authorization header format"))?;

    let user = lookup_token_user(&state.db, key)
        .await?
        .ok_or_else(|| ApiError::authentication("Invalid token"))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter to read the user attached by
/// `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::authentication("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}
