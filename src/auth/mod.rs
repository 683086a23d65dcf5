//! Authentication Module
//!
//! This module handles user registration, credential checking, and API token
//! management.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User data model and database operations
//! - **`tokens`** - Opaque API token issuance and lookup
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Token Scheme
//!
//! Each user holds one opaque API key, issued at signup and reused on
//! signin. Protected routes require the header:
//!
//! ```http
//! Authorization: Token <key>
//! ```
//!
//! Keys are random (UUID v4) and stored in the `auth_tokens` table; token
//! verification is a database lookup, so revoking a token is a row delete.

/// User model and database operations
pub mod users;

/// API token management
pub mod tokens;

/// HTTP handlers for authentication endpoints
pub mod handlers;
