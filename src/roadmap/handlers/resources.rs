/**
 * Resource CRUD Handlers
 *
 * Same policy as steps: reads open to authenticated users, mutations
 * owner-only via `authz::check` against the owning roadmap's creator.
 */

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::authz::{self, Action};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::roadmap::db::{self, ResourceResponse};
use crate::roadmap::ResourceType;
use crate::server::state::AppState;

/// Resource list filter
#[derive(Debug, Deserialize)]
pub struct ResourceListQuery {
    /// Restrict to one step's resources
    pub step: Option<i64>,
}

/// Resource create body
#[derive(Debug, Deserialize)]
pub struct ResourceCreate {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub resource_type: ResourceType,
    /// Parent step id
    pub step: i64,
}

/// Resource update body
#[derive(Debug, Deserialize)]
pub struct ResourceUpdate {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub resource_type: ResourceType,
}

/// GET /api/resources?step={id}
///
/// With the filter, returns the named step's resources; without it, all
/// resources under roadmaps owned by the caller.
pub async fn list_resources(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<Vec<ResourceResponse>>, ApiError> {
    let rows = match query.step {
        Some(step_id) => db::list_resources_for_step(&state.db, step_id).await?,
        None => db::list_resources_owned(&state.db, user.user_id).await?,
    };

    Ok(Json(rows.into_iter().map(ResourceResponse::from).collect()))
}

/// POST /api/resources
pub async fn create_resource(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<ResourceCreate>,
) -> Result<(StatusCode, Json<ResourceResponse>), ApiError> {
    let (step, owner_id) = db::find_step(&state.db, payload.step)
        .await?
        .ok_or_else(|| ApiError::not_found("Step not found"))?;
    authz::check(user.user_id, owner_id, Action::Write)?;

    let row = db::insert_resource(
        &state.db,
        step.id,
        &payload.title,
        &payload.url,
        &payload.description,
        payload.resource_type,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(ResourceResponse::from(row))))
}

/// GET /api/resources/{id}
pub async fn get_resource(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let (row, owner_id) = db::find_resource(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Resource not found"))?;
    authz::check(user.user_id, owner_id, Action::Read)?;

    Ok(Json(ResourceResponse::from(row)))
}

/// PUT /api/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<ResourceUpdate>,
) -> Result<Json<ResourceResponse>, ApiError> {
    let (_, owner_id) = db::find_resource(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Resource not found"))?;
    authz::check(user.user_id, owner_id, Action::Write)?;

    let row = db::update_resource(
        &state.db,
        id,
        &payload.title,
        &payload.url,
        &payload.description,
        payload.resource_type,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Resource not found"))?;

    Ok(Json(ResourceResponse::from(row)))
}

/// DELETE /api/resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let (_, owner_id) = db::find_resource(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Resource not found"))?;
    authz::check(user.user_id, owner_id, Action::Write)?;

    db::delete_resource(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
