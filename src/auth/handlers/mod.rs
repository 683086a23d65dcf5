//! Authentication HTTP Handlers
//!
//! HTTP handlers for the authentication endpoints:
//!
//! - `POST /api/auth/signup` - User registration (`signup`)
//! - `POST /api/auth/signin` - Credential check and token issuance (`signin`)
//! - `GET /api/auth/me` - Current user lookup (`me`)
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs     - Handler exports
//! ├── types.rs   - Request and response types
//! ├── signup.rs  - Registration handler
//! ├── signin.rs  - Sign-in handler
//! └── me.rs      - Current user handler
//! ```

/// Request and response types
pub mod types;

/// Registration handler
pub mod signup;

/// Sign-in handler
pub mod signin;

/// Current user handler
pub mod me;

pub use me::me;
pub use signin::signin;
pub use signup::signup;
