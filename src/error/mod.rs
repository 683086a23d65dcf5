//! API Error Module
//!
//! This module defines the error types used by HTTP handlers and their
//! conversion into HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Taxonomy
//!
//! - `Validation` - missing or malformed input (400)
//! - `Authentication` - missing or invalid credentials (401)
//! - `Authorization` - owner mismatch on a write (403)
//! - `Conflict` - uniqueness violation on signup (409)
//! - `NotFound` - unknown id, or id outside the caller's visible set (404)
//! - `Persistence` - constraint violation or transaction failure (500)
//!
//! # HTTP Response Conversion
//!
//! `ApiError` implements `IntoResponse`, so handlers can return it directly.
//! The error is converted to a JSON body of the form:
//!
//! ```json
//! {
//!   "error": "Error message",
//!   "status": 400
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
