//! Room routes: CRUD over the store's room rows.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::room::{self, CreateRoom, RoomError, RoomRow, UpdateRoom};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListRoomsQuery {
    pub floor_id: Option<Uuid>,
}

/// `GET /api/rooms?floor_id=` — list rooms, optionally for one floor.
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<ListRoomsQuery>,
) -> Result<Json<Vec<RoomRow>>, StatusCode> {
    let rows = room::list_rooms(&state.pool, query.floor_id)
        .await
        .map_err(room_error_to_status)?;
    Ok(Json(rows))
}

/// `GET /api/rooms/:id` — fetch one room.
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomRow>, StatusCode> {
    let row = room::get_room(&state.pool, room_id)
        .await
        .map_err(room_error_to_status)?;
    Ok(Json(row))
}

/// `POST /api/rooms` — create a room. The shape is validated and normalized
/// before it is stored.
pub async fn create_room(
    State(state): State<AppState>,
    Json(body): Json<CreateRoom>,
) -> Result<(StatusCode, Json<RoomRow>), StatusCode> {
    let row = room::create_room(&state.pool, body)
        .await
        .map_err(room_error_to_status)?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `PATCH /api/rooms/:id` — sparse update; returns the full replacement
/// row for the caller to splice into its snapshot.
pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(body): Json<UpdateRoom>,
) -> Result<Json<RoomRow>, StatusCode> {
    let row = room::update_room(&state.pool, room_id, body)
        .await
        .map_err(room_error_to_status)?;
    Ok(Json(row))
}

/// `DELETE /api/rooms/:id` — delete a room.
pub async fn delete_room(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    room::delete_room(&state.pool, room_id)
        .await
        .map_err(room_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub(crate) fn room_error_to_status(err: RoomError) -> StatusCode {
    match err {
        RoomError::NotFound(_) | RoomError::FloorNotFound(_) => StatusCode::NOT_FOUND,
        RoomError::DuplicateNumber { .. } => StatusCode::CONFLICT,
        RoomError::InvalidShape(_) | RoomError::InvalidStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RoomError::CorruptShape(_) | RoomError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "rooms_test.rs"]
mod tests;
