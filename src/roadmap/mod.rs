//! Research Roadmap Domain
//!
//! This module implements the roadmap generation-and-persistence flow and
//! the CRUD endpoints for its entities.
//!
//! # Flow
//!
//! An authenticated `POST /api/roadmaps/generate` request:
//!
//! 1. **`generator`** produces an in-memory [`generator::RoadmapDraft`]
//!    from `(topic, field, depth)`. Pure function, no I/O.
//! 2. **`persister`** materializes the draft inside one database
//!    transaction: topic get-or-create, then roadmap, steps, and resources.
//! 3. The handler serializes the persisted aggregate back to the caller.
//!
//! # Module Structure
//!
//! ```text
//! roadmap/
//! ├── mod.rs       - Shared vocabulary (ResourceType, RoadmapError)
//! ├── generator.rs - Draft generation
//! ├── persister.rs - Transactional materialization
//! ├── db.rs        - Rows, response DTOs, CRUD queries
//! └── handlers/    - HTTP handlers
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Draft generation
pub mod generator;

/// Transactional materialization
pub mod persister;

/// Rows, response DTOs, and CRUD queries
pub mod db;

/// HTTP handlers
pub mod handlers;

/// Resource classification
///
/// Stored as lowercase text in the `resources.resource_type` column and
/// serialized the same way in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ResourceType {
    Article,
    Book,
    Video,
    Course,
    Website,
    Tool,
    Other,
}

/// Roadmap domain error
///
/// Separates client fault from storage fault so the API layer can map each
/// to the correct HTTP status: `InvalidArgument` becomes 400, `Persistence`
/// becomes 500 (or 404 for a missing row).
#[derive(Debug, Error)]
pub enum RoadmapError {
    /// The caller supplied unusable input (e.g. an empty topic)
    #[error("{0}")]
    InvalidArgument(String),

    /// The storage layer failed; propagated, not retried
    #[error(transparent)]
    Persistence(#[from] sqlx::Error),
}
