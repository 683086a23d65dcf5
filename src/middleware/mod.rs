//! Middleware Module
//!
//! Request processing middleware. Currently only token authentication.

/// Token authentication middleware
pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
