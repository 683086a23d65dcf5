/**
 * Step CRUD Handlers
 *
 * Steps follow the owner-or-read-only policy rather than queryset
 * filtering: reads are open to any authenticated user (steps are reachable
 * through the `?roadmap=` filter anyway), while create/update/delete go
 * through `authz::check` against the roadmap's owner and fail with 403 for
 * non-owners.
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
use crate::roadmap::db::{self, ResourceResponse, StepResponse};
use crate::server::state::AppState;

/// Step list filter
#[derive(Debug, Deserialize)]
pub struct StepListQuery {
    /// Restrict to one roadmap's steps
    pub roadmap: Option<i64>,
}

/// Step create body
#[derive(Debug, Deserialize)]
pub struct StepCreate {
    pub title: String,
    pub description: String,
    pub order: i64,
    /// Parent roadmap id
    pub roadmap: i64,
    pub estimated_time: Option<String>,
    /// Free-text resource note
    #[serde(default)]
    pub resources: String,
}

/// Step update body
#[derive(Debug, Deserialize)]
pub struct StepUpdate {
    pub title: String,
    pub description: String,
    pub order: i64,
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub resources: String,
}

async fn step_response(
    state: &AppState,
    step: db::StepRow,
) -> Result<StepResponse, ApiError> {
    let resource_links = db::list_resources_for_step(&state.db, step.id)
        .await?
        .into_iter()
        .map(ResourceResponse::from)
        .collect();
    Ok(StepResponse::new(step, resource_links))
}

/// GET /api/steps?roadmap={id}
///
/// With the filter, returns the named roadmap's steps; without it, all
/// steps of roadmaps owned by the caller.
pub async fn list_steps(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<StepListQuery>,
) -> Result<Json<Vec<StepResponse>>, ApiError> {
    let rows = match query.roadmap {
        Some(roadmap_id) => db::list_steps_for_roadmap(&state.db, roadmap_id).await?,
        None => db::list_steps_owned(&state.db, user.user_id).await?,
    };

    let mut steps = Vec::with_capacity(rows.len());
    for row in rows {
        steps.push(step_response(&state, row).await?);
    }

    Ok(Json(steps))
}

/// POST /api/steps
pub async fn create_step(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<StepCreate>,
) -> Result<(StatusCode, Json<StepResponse>), ApiError> {
    if payload.order < 1 {
        return Err(ApiError::validation("Order must be a positive integer"));
    }

    let roadmap = db::find_roadmap_any(&state.db, payload.roadmap)
        .await?
        .ok_or_else(|| ApiError::not_found("Roadmap not found"))?;
    authz::check(user.user_id, roadmap.created_by, Action::Write)?;

    let row = db::insert_step(
        &state.db,
        roadmap.id,
        &payload.title,
        &payload.description,
        payload.order,
        payload.estimated_time.as_deref(),
        &payload.resources,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(step_response(&state, row).await?)))
}

/// GET /api/steps/{id}
pub async fn get_step(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<StepResponse>, ApiError> {
    let (row, owner_id) = db::find_step(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Step not found"))?;
    authz::check(user.user_id, owner_id, Action::Read)?;

    Ok(Json(step_response(&state, row).await?))
}

/// PUT /api/steps/{id}
pub async fn update_step(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<StepUpdate>,
) -> Result<Json<StepResponse>, ApiError> {
    if payload.order < 1 {
        return Err(ApiError::validation("Order must be a positive integer"));
    }

    let (_, owner_id) = db::find_step(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Step not found"))?;
    authz::check(user.user_id, owner_id, Action::Write)?;

    let row = db::update_step(
        &state.db,
        id,
        &payload.title,
        &payload.description,
        payload.order,
        payload.estimated_time.as_deref(),
        &payload.resources,
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Step not found"))?;

    Ok(Json(step_response(&state, row).await?))
}

/// DELETE /api/steps/{id}
pub async fn delete_step(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let (_, owner_id) = db::find_step(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Step not found"))?;
    authz::check(user.user_id, owner_id, Action::Write)?;

    db::delete_step(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
