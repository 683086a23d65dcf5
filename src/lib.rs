//! ResearchPath Backend
//!
//! This crate implements the ResearchPath HTTP server: a REST backend for
//! generating and managing research roadmaps, with token-based authentication
//! and lightweight chat rooms.
//!
//! # Overview
//!
//! The crate includes:
//! - Axum HTTP server setup and configuration
//! - Token-based authentication (signup, signin, opaque API keys)
//! - Research roadmap generation and transactional persistence
//! - CRUD endpoints for topics, roadmaps, steps, and resources
//! - Chat rooms and messages
//! - Database persistence (SQLite via sqlx)
//!
//! # Architecture
//!
//! The crate is organized into focused modules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Authentication, API tokens, user management
//! - **`authz`** - Ownership-based authorization checks
//! - **`roadmap`** - Roadmap generation, persistence, and CRUD handlers
//! - **`chat`** - Chat rooms and messages
//! - **`middleware`** - Request processing middleware
//! - **`error`** - API error types
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes.rs       - Route configuration
//! ├── auth/           - Authentication
//! ├── authz.rs        - Authorization checks
//! ├── roadmap/        - Roadmap domain (generator, persister, handlers)
//! ├── chat/           - Chat rooms and messages
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! All handlers return `Result<_, ApiError>`. `ApiError` carries the error
//! taxonomy (validation, authentication, authorization, not-found,
//! persistence) and converts into a JSON error response with the matching
//! HTTP status code. Errors are logged at the handler boundary and never
//! retried.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// API error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Ownership-based authorization checks
pub mod authz;

/// Research roadmap domain
pub mod roadmap;

/// Chat rooms and messages
pub mod chat;

/// Middleware for request processing
pub mod middleware;

// Re-export commonly used types
pub use error::ApiError;
pub use server::state::AppState;
pub use routes::create_router;
