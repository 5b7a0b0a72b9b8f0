//! Floor service — CRUD, cascading delete, duplication, and the plan
//! snapshot.
//!
//! DESIGN
//! ======
//! A floor is a plan image plus its rooms. The plan image is immutable once
//! the floor exists: replacing it under rooms whose coordinates were
//! captured against the old image would silently invalidate every shape, so
//! "new image" means "new floor". Multi-row mutations (cascade delete,
//! duplicate) run in a single transaction.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::services::room::{self, RoomRow};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FloorError {
    #[error("floor not found: {0}")]
    NotFound(Uuid),
    #[error("floor number {0} already exists")]
    DuplicateNumber(i32),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from floor queries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FloorRow {
    pub id: Uuid,
    pub floor_number: i32,
    pub plan_image_url: String,
}

/// A floor with its rooms, as served by the plan snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FloorWithRooms {
    pub id: Uuid,
    pub floor_number: i32,
    pub plan_image_url: String,
    pub rooms: Vec<RoomRow>,
}

// =============================================================================
// CRUD
// =============================================================================

/// Create a new floor with an empty room set.
///
/// # Errors
///
/// Returns `DuplicateNumber` if a floor with this number exists, or a
/// database error if the insert fails.
pub async fn create_floor(
    pool: &PgPool,
    floor_number: i32,
    plan_image_url: &str,
) -> Result<FloorRow, FloorError> {
    let id = Uuid::new_v4();
    let result = sqlx::query("INSERT INTO floors (id, floor_number, plan_image_url) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(floor_number)
        .bind(plan_image_url)
        .execute(pool)
        .await;

    match result {
        Ok(_) => {
            info!(%id, floor_number, "floor created");
            Ok(FloorRow { id, floor_number, plan_image_url: plan_image_url.to_string() })
        }
        Err(e) if is_unique_violation(&e) => Err(FloorError::DuplicateNumber(floor_number)),
        Err(e) => Err(FloorError::Database(e)),
    }
}

/// List all floors ordered by floor number.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_floors(pool: &PgPool) -> Result<Vec<FloorRow>, FloorError> {
    let rows = sqlx::query_as::<_, (Uuid, i32, String)>(
        "SELECT id, floor_number, plan_image_url FROM floors ORDER BY floor_number",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, floor_number, plan_image_url)| FloorRow { id, floor_number, plan_image_url })
        .collect())
}

/// Delete a floor and every room on it, in one transaction.
///
/// # Errors
///
/// Returns `NotFound` if no such floor exists, or a database error if the
/// delete fails.
pub async fn delete_floor(pool: &PgPool, floor_id: Uuid) -> Result<(), FloorError> {
    let mut tx = pool.begin().await?;

    let rooms_deleted = sqlx::query("DELETE FROM rooms WHERE floor_id = $1")
        .bind(floor_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let floors_deleted = sqlx::query("DELETE FROM floors WHERE id = $1")
        .bind(floor_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if floors_deleted == 0 {
        tx.rollback().await?;
        return Err(FloorError::NotFound(floor_id));
    }

    tx.commit().await?;
    info!(%floor_id, rooms_deleted, "floor deleted");
    Ok(())
}

/// Duplicate a floor under a new number, deep-copying every room onto it.
///
/// Shapes are copied verbatim: coordinates are image-relative, and the new
/// floor reuses the same plan image, so they stay valid.
///
/// # Errors
///
/// Returns `NotFound` if the source floor doesn't exist, `DuplicateNumber`
/// if the new number is taken, or a database error otherwise.
pub async fn duplicate_floor(
    pool: &PgPool,
    floor_id: Uuid,
    new_number: i32,
) -> Result<FloorRow, FloorError> {
    let mut tx = pool.begin().await?;

    let source = sqlx::query_as::<_, (String,)>("SELECT plan_image_url FROM floors WHERE id = $1")
        .bind(floor_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(FloorError::NotFound(floor_id))?;

    let new_id = Uuid::new_v4();
    let insert = sqlx::query("INSERT INTO floors (id, floor_number, plan_image_url) VALUES ($1, $2, $3)")
        .bind(new_id)
        .bind(new_number)
        .bind(&source.0)
        .execute(&mut *tx)
        .await;
    if let Err(e) = insert {
        if is_unique_violation(&e) {
            return Err(FloorError::DuplicateNumber(new_number));
        }
        return Err(FloorError::Database(e));
    }

    let copied = sqlx::query(
        "INSERT INTO rooms (id, floor_id, room_number, category, area, capacity, price, status, shape, media, amenities) \
         SELECT gen_random_uuid(), $2, room_number, category, area, capacity, price, status, shape, media, amenities \
         FROM rooms WHERE floor_id = $1",
    )
    .bind(floor_id)
    .bind(new_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    info!(source = %floor_id, %new_id, new_number, rooms_copied = copied, "floor duplicated");
    Ok(FloorRow { id: new_id, floor_number: new_number, plan_image_url: source.0 })
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Full plan snapshot: every floor with its rooms nested, ordered by floor
/// number.
///
/// # Errors
///
/// Returns a database error if a query fails.
pub async fn plan_snapshot(pool: &PgPool) -> Result<Vec<FloorWithRooms>, FloorError> {
    let floors = list_floors(pool).await?;
    let rooms = room::fetch_rooms(pool, None).await?;

    let mut by_floor: HashMap<Uuid, Vec<RoomRow>> = HashMap::new();
    for room in rooms {
        by_floor.entry(room.floor_id).or_default().push(room);
    }

    Ok(floors
        .into_iter()
        .map(|f| FloorWithRooms {
            rooms: by_floor.remove(&f.id).unwrap_or_default(),
            id: f.id,
            floor_number: f.floor_number,
            plan_image_url: f.plan_image_url,
        })
        .collect())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

#[cfg(test)]
#[path = "floor_test.rs"]
mod tests;
