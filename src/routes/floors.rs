//! Floor routes: listing, creation, deletion, duplication, and the plan
//! snapshot the canvas hydrates from.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::services::floor::{self, FloorError, FloorRow, FloorWithRooms};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateFloorBody {
    pub floor_number: i32,
    pub plan_image_url: String,
}

#[derive(Deserialize)]
pub struct DuplicateFloorBody {
    pub new_floor_number: i32,
}

/// `GET /api/plan` — every floor with its rooms nested.
pub async fn plan_snapshot(
    State(state): State<AppState>,
) -> Result<Json<Vec<FloorWithRooms>>, StatusCode> {
    let floors = floor::plan_snapshot(&state.pool)
        .await
        .map_err(floor_error_to_status)?;
    Ok(Json(floors))
}

/// `GET /api/floors` — list floors (no rooms).
pub async fn list_floors(State(state): State<AppState>) -> Result<Json<Vec<FloorRow>>, StatusCode> {
    let rows = floor::list_floors(&state.pool)
        .await
        .map_err(floor_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/floors` — create a floor for an already-uploaded plan image.
pub async fn create_floor(
    State(state): State<AppState>,
    Json(body): Json<CreateFloorBody>,
) -> Result<(StatusCode, Json<FloorRow>), StatusCode> {
    let row = floor::create_floor(&state.pool, body.floor_number, &body.plan_image_url)
        .await
        .map_err(floor_error_to_status)?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `DELETE /api/floors/:id` — delete a floor and all of its rooms.
pub async fn delete_floor(
    State(state): State<AppState>,
    Path(floor_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    floor::delete_floor(&state.pool, floor_id)
        .await
        .map_err(floor_error_to_status)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// `POST /api/floors/:id/duplicate` — copy a floor and its rooms under a
/// new number.
pub async fn duplicate_floor(
    State(state): State<AppState>,
    Path(floor_id): Path<Uuid>,
    Json(body): Json<DuplicateFloorBody>,
) -> Result<(StatusCode, Json<FloorRow>), StatusCode> {
    let row = floor::duplicate_floor(&state.pool, floor_id, body.new_floor_number)
        .await
        .map_err(floor_error_to_status)?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub(crate) fn floor_error_to_status(err: FloorError) -> StatusCode {
    match err {
        FloorError::NotFound(_) => StatusCode::NOT_FOUND,
        FloorError::DuplicateNumber(_) => StatusCode::CONFLICT,
        FloorError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "floors_test.rs"]
mod tests;
