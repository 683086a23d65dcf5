/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers. These types are shared across signup, signin, and me handlers.
 *
 * Response types are explicit allow-lists: they carry only fields that are
 * safe to return to clients, never the password hash.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::User;

/// Sign up request
///
/// Contains the username, email and password for user registration.
#[derive(Deserialize, Serialize, Debug)]
pub struct SignupRequest {
    /// User's chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Sign in request
#[derive(Deserialize, Serialize, Debug)]
pub struct SigninRequest {
    /// User's email address
    pub email: String,
    /// User's password (verified against the stored hash)
    pub password: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    /// User's unique id
    pub id: i64,
    /// User's username
    pub username: String,
    /// User's email address
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Signup response
///
/// Contains the created user and an API token for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct SignupResponse {
    /// Created user (without sensitive data)
    pub user: UserResponse,
    /// Opaque API token for the Authorization header
    pub token: String,
}

/// Signin response
#[derive(Serialize, Deserialize, Debug)]
pub struct SigninResponse {
    /// Opaque API token for the Authorization header
    pub token: String,
    /// Authenticated user's id
    pub user_id: i64,
    /// Authenticated user's email
    pub email: String,
}
