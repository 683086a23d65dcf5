//! Roadmap HTTP Handlers
//!
//! CRUD endpoints for topics, roadmaps, steps, and resources, plus the
//! generation endpoint.
//!
//! # Visibility Rules
//!
//! - Topic and roadmap lists/details are owner-filtered: another user's
//!   record is indistinguishable from a missing one (404).
//! - Step and resource lists accept an optional parent-id filter
//!   (`?roadmap=` / `?step=`); without it they default to records
//!   transitively owned by the caller. Details are readable by any
//!   authenticated user, mutations are owner-only (403 otherwise).
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Handler exports
//! ├── generate.rs  - POST /api/roadmaps/generate
//! ├── topics.rs    - Topic CRUD
//! ├── roadmaps.rs  - Roadmap CRUD
//! ├── steps.rs     - Step CRUD
//! └── resources.rs - Resource CRUD
//! ```

/// Generation endpoint
pub mod generate;

/// Topic CRUD
pub mod topics;

/// Roadmap CRUD
pub mod roadmaps;

/// Step CRUD
pub mod steps;

/// Resource CRUD
pub mod resources;

pub use generate::generate_roadmap;
pub use resources::{create_resource, delete_resource, get_resource, list_resources, update_resource};
pub use roadmaps::{create_roadmap, delete_roadmap, get_roadmap, list_roadmaps, update_roadmap};
pub use steps::{create_step, delete_step, get_step, list_steps, update_step};
pub use topics::{create_topic, delete_topic, get_topic, list_topics, update_topic};
