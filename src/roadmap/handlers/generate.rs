/**
 * Roadmap Generation Endpoint
 *
 * This module implements POST /api/roadmaps/generate: the handler validates
 * the request, invokes the generator (no persistence), hands the draft to
 * the persister (one transaction), and returns the persisted aggregate.
 *
 * # Request
 *
 * ```json
 * { "topic": "Quantum Computing", "field": "Physics", "depth": "beginner" }
 * ```
 *
 * `topic` and `field` are required; `depth` is optional free text.
 *
 * # Response
 *
 * `201 Created` with the serialized roadmap: id, title, description,
 * timestamps, and nested steps each carrying their `resource_links`.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::roadmap::db::RoadmapDetail;
use crate::roadmap::{generator, persister};
use crate::server::state::AppState;

/// Generation request body
///
/// Fields are optional at the deserialization level so that a missing
/// `topic`/`field` produces the contract's 400 rather than a generic
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub topic: Option<String>,
    pub field: Option<String>,
    pub depth: Option<String>,
}

/// Generate and persist a research roadmap
///
/// # Errors
///
/// * `400 Bad Request` - missing or blank `topic`/`field`; no generation
///   is attempted
/// * `500 Internal Server Error` - persistence failure; nothing is written
pub async fn generate_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<RoadmapDetail>), ApiError> {
    let topic = request.topic.as_deref().unwrap_or_default();
    let field = request.field.as_deref().unwrap_or_default();

    if topic.trim().is_empty() || field.trim().is_empty() {
        return Err(ApiError::validation("Both topic and field are required"));
    }

    tracing::info!(
        "Generating roadmap for user {}: topic={:?}, field={:?}",
        user.user_id,
        topic,
        field
    );

    let draft = generator::generate(topic, field, request.depth.as_deref())?;
    let roadmap = persister::persist(&state.db, &draft, user.user_id).await?;

    tracing::info!("Roadmap {} persisted for user {}", roadmap.id, user.user_id);

    Ok((StatusCode::CREATED, Json(roadmap)))
}
