/**
 * Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * information about the currently authenticated user.
 *
 * The route sits behind the auth middleware, so the handler only has to
 * read the authenticated principal from the request.
 */

use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - if no authenticated user is attached to the request
pub async fn me(AuthUser(user): AuthUser) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse {
        id: user.user_id,
        username: user.username,
        email: user.email,
    }))
}
