//! Room service — CRUD with shape validation and sparse updates.
//!
//! DESIGN
//! ======
//! The store is the boundary where shapes are validated: every create and
//! every shape update goes through [`Shape::normalized`], so no
//! sub-three-vertex polygon and no stale polygon bounds can reach the
//! database. Updates are sparse — the row is fetched, present fields are
//! merged in memory, and the whole row is written back and returned, so the
//! caller can splice the replacement into its own snapshot.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::floor::is_unique_violation;
use crate::shape::{Shape, ShapeError};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("room not found: {0}")]
    NotFound(Uuid),
    #[error("floor not found: {0}")]
    FloorNotFound(Uuid),
    #[error("room number {number} already exists on floor {floor_id}")]
    DuplicateNumber { floor_id: Uuid, number: String },
    #[error("invalid shape: {0}")]
    InvalidShape(#[from] ShapeError),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("stored shape for room {0} is malformed")]
    CorruptShape(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Room occupancy states accepted by the store.
const STATUSES: &[&str] = &["available", "occupied", "maintenance"];

/// A room row as stored and served.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RoomRow {
    pub id: Uuid,
    pub floor_id: Uuid,
    pub room_number: String,
    pub category: String,
    pub area: f64,
    pub capacity: i32,
    pub price: f64,
    pub status: String,
    pub shape: Shape,
    pub media: Vec<String>,
    pub amenities: Vec<String>,
}

/// Fields for creating a room. The shape arrives already parsed but not yet
/// validated.
#[derive(Debug, serde::Deserialize)]
pub struct CreateRoom {
    pub floor_id: Uuid,
    pub room_number: String,
    pub category: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_status")]
    pub status: String,
    pub shape: Shape,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Sparse update: only present fields are applied.
#[derive(Debug, Default, serde::Deserialize)]
pub struct UpdateRoom {
    pub room_number: Option<String>,
    pub category: Option<String>,
    pub area: Option<f64>,
    pub capacity: Option<i32>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub shape: Option<Shape>,
    pub media: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

fn default_capacity() -> i32 {
    2
}

fn default_status() -> String {
    "available".to_string()
}

fn validate_status(status: &str) -> Result<(), RoomError> {
    if STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(RoomError::InvalidStatus(status.to_string()))
    }
}

/// Merge a sparse update into an existing row, validating shape and status.
///
/// # Errors
///
/// Returns `InvalidShape` or `InvalidStatus` when the incoming fields fail
/// validation; the row is left untouched in that case.
pub fn apply_update(row: &mut RoomRow, update: UpdateRoom) -> Result<(), RoomError> {
    let normalized_shape = update.shape.map(Shape::normalized).transpose()?;
    if let Some(status) = &update.status {
        validate_status(status)?;
    }

    if let Some(v) = update.room_number {
        row.room_number = v;
    }
    if let Some(v) = update.category {
        row.category = v;
    }
    if let Some(v) = update.area {
        row.area = v;
    }
    if let Some(v) = update.capacity {
        row.capacity = v;
    }
    if let Some(v) = update.price {
        row.price = v;
    }
    if let Some(v) = update.status {
        row.status = v;
    }
    if let Some(v) = normalized_shape {
        row.shape = v;
    }
    if let Some(v) = update.media {
        row.media = v;
    }
    if let Some(v) = update.amenities {
        row.amenities = v;
    }
    Ok(())
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a room on a floor.
///
/// # Errors
///
/// Returns `InvalidShape` / `InvalidStatus` on bad input, `FloorNotFound`
/// for an unknown floor, `DuplicateNumber` when the room number is taken on
/// that floor, or a database error.
pub async fn create_room(pool: &PgPool, room: CreateRoom) -> Result<RoomRow, RoomError> {
    let shape = room.shape.normalized()?;
    validate_status(&room.status)?;

    let row = RoomRow {
        id: Uuid::new_v4(),
        floor_id: room.floor_id,
        room_number: room.room_number,
        category: room.category,
        area: room.area,
        capacity: room.capacity,
        price: room.price,
        status: room.status,
        shape,
        media: room.media,
        amenities: room.amenities,
    };

    let result = sqlx::query(
        "INSERT INTO rooms (id, floor_id, room_number, category, area, capacity, price, status, shape, media, amenities) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(row.id)
    .bind(row.floor_id)
    .bind(&row.room_number)
    .bind(&row.category)
    .bind(row.area)
    .bind(row.capacity)
    .bind(row.price)
    .bind(&row.status)
    .bind(serde_json::to_value(&row.shape).unwrap_or_default())
    .bind(serde_json::to_value(&row.media).unwrap_or_default())
    .bind(serde_json::to_value(&row.amenities).unwrap_or_default())
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!(id = %row.id, floor_id = %row.floor_id, number = %row.room_number, "room created");
            Ok(row)
        }
        Err(e) if is_unique_violation(&e) => Err(RoomError::DuplicateNumber {
            floor_id: row.floor_id,
            number: row.room_number,
        }),
        Err(e) if is_foreign_key_violation(&e) => Err(RoomError::FloorNotFound(row.floor_id)),
        Err(e) => Err(RoomError::Database(e)),
    }
}

/// List rooms, optionally filtered to one floor, ordered by room number.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_rooms(pool: &PgPool, floor_id: Option<Uuid>) -> Result<Vec<RoomRow>, RoomError> {
    Ok(fetch_rooms(pool, floor_id).await?)
}

/// Fetch one room by id.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error.
pub async fn get_room(pool: &PgPool, room_id: Uuid) -> Result<RoomRow, RoomError> {
    let row = sqlx::query_as::<_, RoomTuple>(
        "SELECT id, floor_id, room_number, category, area, capacity, price, status, shape, media, amenities \
         FROM rooms WHERE id = $1",
    )
    .bind(room_id)
    .fetch_optional(pool)
    .await?
    .ok_or(RoomError::NotFound(room_id))?;

    row_from_tuple(row)
}

/// Apply a sparse update and return the full replacement row.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, validation errors for bad fields,
/// `DuplicateNumber` when renaming collides, or a database error.
pub async fn update_room(pool: &PgPool, room_id: Uuid, update: UpdateRoom) -> Result<RoomRow, RoomError> {
    let mut row = get_room(pool, room_id).await?;
    apply_update(&mut row, update)?;

    let result = sqlx::query(
        "UPDATE rooms SET room_number = $2, category = $3, area = $4, capacity = $5, price = $6, \
         status = $7, shape = $8, media = $9, amenities = $10, updated_at = now() \
         WHERE id = $1",
    )
    .bind(row.id)
    .bind(&row.room_number)
    .bind(&row.category)
    .bind(row.area)
    .bind(row.capacity)
    .bind(row.price)
    .bind(&row.status)
    .bind(serde_json::to_value(&row.shape).unwrap_or_default())
    .bind(serde_json::to_value(&row.media).unwrap_or_default())
    .bind(serde_json::to_value(&row.amenities).unwrap_or_default())
    .execute(pool)
    .await;

    match result {
        Ok(_) => {
            info!(id = %row.id, "room updated");
            Ok(row)
        }
        Err(e) if is_unique_violation(&e) => Err(RoomError::DuplicateNumber {
            floor_id: row.floor_id,
            number: row.room_number,
        }),
        Err(e) => Err(RoomError::Database(e)),
    }
}

/// Delete a room by id.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a database error.
pub async fn delete_room(pool: &PgPool, room_id: Uuid) -> Result<(), RoomError> {
    let deleted = sqlx::query("DELETE FROM rooms WHERE id = $1")
        .bind(room_id)
        .execute(pool)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(RoomError::NotFound(room_id));
    }
    info!(id = %room_id, "room deleted");
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

type RoomTuple = (
    Uuid,
    Uuid,
    String,
    String,
    f64,
    i32,
    f64,
    String,
    serde_json::Value,
    serde_json::Value,
    serde_json::Value,
);

pub(crate) async fn fetch_rooms(
    pool: &PgPool,
    floor_id: Option<Uuid>,
) -> Result<Vec<RoomRow>, sqlx::Error> {
    let rows = match floor_id {
        Some(floor_id) => {
            sqlx::query_as::<_, RoomTuple>(
                "SELECT id, floor_id, room_number, category, area, capacity, price, status, shape, media, amenities \
                 FROM rooms WHERE floor_id = $1 ORDER BY room_number",
            )
            .bind(floor_id)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, RoomTuple>(
                "SELECT id, floor_id, room_number, category, area, capacity, price, status, shape, media, amenities \
                 FROM rooms ORDER BY floor_id, room_number",
            )
            .fetch_all(pool)
            .await?
        }
    };

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match row_from_tuple(row) {
            Ok(room) => out.push(room),
            // A malformed stored shape cannot happen through this service;
            // skip the row rather than failing the whole listing.
            Err(e) => tracing::warn!(error = %e, "skipping room with malformed stored data"),
        }
    }
    Ok(out)
}

fn row_from_tuple(row: RoomTuple) -> Result<RoomRow, RoomError> {
    let (id, floor_id, room_number, category, area, capacity, price, status, shape, media, amenities) = row;
    let shape: Shape = serde_json::from_value(shape).map_err(|_| RoomError::CorruptShape(id))?;
    let media: Vec<String> = serde_json::from_value(media).unwrap_or_default();
    let amenities: Vec<String> = serde_json::from_value(amenities).unwrap_or_default();
    Ok(RoomRow {
        id,
        floor_id,
        room_number,
        category,
        area,
        capacity,
        price,
        status,
        shape,
        media,
        amenities,
    })
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_foreign_key_violation)
}

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;
