/**
 * Topic CRUD Handlers
 *
 * List, retrieve, create, update, and delete for research topics. All
 * queries are owner-filtered: a topic created by another user is
 * observable only as 404.
 *
 * Topic responses nest the full roadmap aggregates under the topic.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::roadmap::db::{self, TopicDetail};
use crate::server::state::AppState;

/// Topic create/update body
#[derive(Debug, Deserialize)]
pub struct TopicPayload {
    pub title: String,
    pub description: String,
}

/// GET /api/topics
pub async fn list_topics(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<TopicDetail>>, ApiError> {
    let rows = db::list_topics(&state.db, user.user_id).await?;

    let mut topics = Vec::with_capacity(rows.len());
    for row in rows {
        topics.push(db::topic_detail(&state.db, row).await?);
    }

    Ok(Json(topics))
}

/// POST /api/topics
pub async fn create_topic(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<TopicPayload>,
) -> Result<(StatusCode, Json<TopicDetail>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    let row = db::insert_topic(&state.db, &payload.title, &payload.description, user.user_id).await?;
    let topic = db::topic_detail(&state.db, row).await?;

    Ok((StatusCode::CREATED, Json(topic)))
}

/// GET /api/topics/{id}
pub async fn get_topic(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<TopicDetail>, ApiError> {
    let row = db::find_topic(&state.db, id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Topic not found"))?;

    Ok(Json(db::topic_detail(&state.db, row).await?))
}

/// PUT /api/topics/{id}
pub async fn update_topic(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<TopicPayload>,
) -> Result<Json<TopicDetail>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }

    let row = db::update_topic(
        &state.db,
        id,
        user.user_id,
        &payload.title,
        &payload.description,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Topic not found"))?;

    Ok(Json(db::topic_detail(&state.db, row).await?))
}

/// DELETE /api/topics/{id}
pub async fn delete_topic(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = db::delete_topic(&state.db, id, user.user_id).await?;
    if !deleted {
        return Err(ApiError::not_found("Topic not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
