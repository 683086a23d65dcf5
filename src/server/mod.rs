//! Server Module
//!
//! This module handles server setup: configuration loading, application
//! state, and app assembly.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs     - Module exports
//! ├── config.rs  - Database configuration and pool creation
//! ├── state.rs   - Application state
//! └── init.rs    - App assembly
//! ```

/// Database configuration
pub mod config;

/// Application state
pub mod state;

/// App assembly
pub mod init;

pub use init::create_app;
