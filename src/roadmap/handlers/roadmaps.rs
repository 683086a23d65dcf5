/**
 * Roadmap CRUD Handlers
 *
 * List, retrieve, create, update, and delete for roadmaps. Owner-filtered
 * like the topic handlers: another user's roadmap is observable only as
 * 404. The generation action lives in `generate.rs`.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::roadmap::db::{self, RoadmapDetail};
use crate::server::state::AppState;

/// Roadmap create body
#[derive(Debug, Deserialize)]
pub struct RoadmapCreate {
    pub title: String,
    pub description: String,
    /// Parent topic id; must be one of the caller's topics
    pub topic: i64,
}

/// Roadmap update body
#[derive(Debug, Deserialize)]
pub struct RoadmapUpdate {
    pub title: String,
    pub description: String,
}

/// GET /api/roadmaps
pub async fn list_roadmaps(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RoadmapDetail>>, ApiError> {
    let rows = db::list_roadmaps(&state.db, user.user_id).await?;

    let mut roadmaps = Vec::with_capacity(rows.len());
    for row in rows {
        roadmaps.push(db::roadmap_detail(&state.db, row).await?);
    }

    Ok(Json(roadmaps))
}

/// POST /api/roadmaps
pub async fn create_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<RoadmapCreate>,
) -> Result<(StatusCode, Json<RoadmapDetail>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    // The parent topic must exist inside the caller's visible set.
    db::find_topic(&state.db, payload.topic, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Topic not found"))?;

    let row = db::insert_roadmap(
        &state.db,
        &payload.title,
        &payload.description,
        payload.topic,
        user.user_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(db::roadmap_detail(&state.db, row).await?)))
}

/// GET /api/roadmaps/{id}
pub async fn get_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<RoadmapDetail>, ApiError> {
    let row = db::find_roadmap(&state.db, id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Roadmap not found"))?;

    Ok(Json(db::roadmap_detail(&state.db, row).await?))
}

/// PUT /api/roadmaps/{id}
pub async fn update_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<RoadmapUpdate>,
) -> Result<Json<RoadmapDetail>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    let row = db::update_roadmap(
        &state.db,
        id,
        user.user_id,
        &payload.title,
        &payload.description,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Roadmap not found"))?;

    Ok(Json(db::roadmap_detail(&state.db, row).await?))
}

/// DELETE /api/roadmaps/{id}
pub async fn delete_roadmap(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = db::delete_roadmap(&state.db, id, user.user_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Roadmap not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
