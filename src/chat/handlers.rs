/**
 * Chat HTTP Handlers
 *
 * - `GET /api/rooms` - rooms the caller participates in
 * - `POST /api/rooms` - create a room (creator auto-joins)
 * - `GET /api/rooms/{id}/messages` - a room's messages (participants see
 *   the history; non-participants get an empty list)
 * - `POST /api/rooms/{id}/messages` - post to a room (participants only,
 *   404 otherwise)
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use crate::chat::db::{self, ChatUser, MessageDetail, RoomDetail};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::state::AppState;

/// Room create body
#[derive(Debug, Deserialize)]
pub struct RoomCreate {
    pub name: String,
}

/// Message create body
#[derive(Debug, Deserialize)]
pub struct MessageCreate {
    pub content: String,
}

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<RoomDetail>>, ApiError> {
    let rows = db::list_rooms_for(&state.db, user.user_id).await?;

    let mut rooms = Vec::with_capacity(rows.len());
    for row in rows {
        rooms.push(db::room_detail(&state.db, row).await?);
    }

    Ok(Json(rooms))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<RoomCreate>,
) -> Result<(StatusCode, Json<RoomDetail>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }

    let room = db::create_room(&state.db, &payload.name, user.user_id).await?;

    tracing::info!("Room {} created by user {}", room.id, user.user_id);

    Ok((StatusCode::CREATED, Json(db::room_detail(&state.db, room).await?)))
}

/// GET /api/rooms/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<i64>,
) -> Result<Json<Vec<MessageDetail>>, ApiError> {
    // Membership gates the history; a non-participant sees an empty list,
    // matching the membership-filtered query semantics.
    if !db::is_participant(&state.db, room_id, user.user_id).await? {
        return Ok(Json(Vec::new()));
    }

    Ok(Json(db::room_messages(&state.db, room_id).await?))
}

/// POST /api/rooms/{id}/messages
pub async fn create_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(room_id): Path<i64>,
    Json(payload): Json<MessageCreate>,
) -> Result<(StatusCode, Json<MessageDetail>), ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::validation("Content is required"));
    }

    let room = db::find_room_for(&state.db, room_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Room not found"))?;

    let sender = ChatUser {
        id: user.user_id,
        username: user.username,
        email: user.email,
    };

    let message = db::insert_message(&state.db, room.id, &sender, &payload.content).await?;

    Ok((StatusCode::CREATED, Json(message)))
}
