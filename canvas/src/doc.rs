//! Document model: floors, rooms, shapes, and the snapshot store.
//!
//! A room's spatial footprint is a [`Shape`]: either an axis-aligned
//! [`Rect`] or a [`Polygon`] of at least three vertices. Both are stored in
//! percent-of-image coordinates, so a shape captured against one render size
//! stays correct at every other. The engine reads rooms out of a
//! [`FloorSnapshot`] owned by this crate and never mutates the caller's data;
//! edits leave the engine as replacement shapes in
//! [`crate::engine::Action::ShapeCommitted`] and come back in through the
//! `apply_*` methods once the store has accepted them.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::MIN_POLYGON_VERTICES;
use crate::geom::{self, PercentPoint, Rect};

/// Unique identifier for a room.
pub type RoomId = Uuid;

/// Unique identifier for a floor.
pub type FloorId = Uuid;

/// Failure to build a shape from raw parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// A polygon needs at least three vertices.
    #[error("polygon needs at least {MIN_POLYGON_VERTICES} vertices, got {0}")]
    InsufficientVertices(usize),
}

/// An ordered vertex list, implicitly closed, with its derived bounding rect.
///
/// Invariants held by construction: at least three vertices, and `bounds` is
/// always the bounding rect of `points`. The only way to change a polygon is
/// to build a new one, which recomputes the bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PolygonRepr", into = "PolygonRepr")]
pub struct Polygon {
    points: Vec<PercentPoint>,
    bounds: Rect,
}

impl Polygon {
    /// Build a polygon from a vertex list, deriving the bounding rect.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InsufficientVertices`] below three vertices.
    pub fn new(points: Vec<PercentPoint>) -> Result<Self, ShapeError> {
        if points.len() < MIN_POLYGON_VERTICES {
            return Err(ShapeError::InsufficientVertices(points.len()));
        }
        // Non-empty by the check above, so the reduction cannot fail.
        let Ok(bounds) = geom::bounding_rect(&points) else {
            return Err(ShapeError::InsufficientVertices(points.len()));
        };
        Ok(Self { points, bounds })
    }

    /// The vertex list.
    #[must_use]
    pub fn points(&self) -> &[PercentPoint] {
        &self.points
    }

    /// The derived bounding rect, kept in sync with the vertices.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; present for API completeness alongside [`Self::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Serialized form of [`Polygon`]. Deserialization revalidates the vertex
/// count and recomputes the bounds, so stale or hand-edited bounds on the
/// wire can never leak into the invariant.
#[derive(Serialize, Deserialize)]
struct PolygonRepr {
    points: Vec<PercentPoint>,
    bounds: Rect,
}

impl TryFrom<PolygonRepr> for Polygon {
    type Error = ShapeError;

    fn try_from(repr: PolygonRepr) -> Result<Self, Self::Error> {
        Self::new(repr.points)
    }
}

impl From<Polygon> for PolygonRepr {
    fn from(polygon: Polygon) -> Self {
        Self { points: polygon.points, bounds: polygon.bounds }
    }
}

/// A room's spatial footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Arbitrary polygon with derived bounds.
    Polygon(Polygon),
}

impl Shape {
    /// The shape's axis-aligned bounds: the rect itself, or the polygon's
    /// derived bounding rect.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::Polygon(polygon) => polygon.bounds(),
        }
    }

    /// Containment test in percent space: AABB for rects, even-odd test for
    /// polygons (with a bounds pre-check to skip the exact test cheaply).
    #[must_use]
    pub fn contains(&self, point: PercentPoint) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(point),
            Self::Polygon(polygon) => {
                polygon.bounds().contains(point) && geom::point_in_polygon(point, polygon.points())
            }
        }
    }
}

/// Occupancy state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

/// A room as stored on a floor and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: RoomId,
    /// The floor this room belongs to.
    pub floor_id: FloorId,
    /// Display number, e.g. `"204"`.
    pub number: String,
    /// Room category, e.g. `"standard"`, `"suite"`.
    pub category: String,
    /// Floor area in square meters.
    pub area: f64,
    /// Guest capacity.
    pub capacity: i32,
    /// Price per night.
    pub price: f64,
    /// Occupancy state.
    pub status: RoomStatus,
    /// Spatial footprint in percent-of-image coordinates.
    pub shape: Shape,
    /// Media references (photo URLs). Opaque to the canvas.
    #[serde(default)]
    pub media: Vec<String>,
    /// Amenity labels. Opaque to the canvas.
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl Room {
    /// Whether the room can be selected for booking in the viewer.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

/// A floor as served by the store: plan image reference plus its rooms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    /// Unique identifier.
    pub id: FloorId,
    /// Display floor number.
    pub number: i32,
    /// URL of the plan image. Immutable once the floor exists.
    pub plan_image_url: String,
    /// Rooms on this floor.
    #[serde(default)]
    pub rooms: Vec<Room>,
}

/// In-memory snapshot of the floor currently on the canvas.
///
/// Rooms are keyed by id; the floor's room list is a view, not ownership —
/// the store remains authoritative and pushes replacements back in through
/// the engine's `apply_*` methods.
#[derive(Debug, Default)]
pub struct FloorSnapshot {
    floor_id: Option<FloorId>,
    plan_image_url: Option<String>,
    rooms: HashMap<RoomId, Room>,
}

impl FloorSnapshot {
    /// Create an empty snapshot (no floor loaded).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a floor and its rooms.
    pub fn load(&mut self, floor: Floor) {
        self.floor_id = Some(floor.id);
        self.plan_image_url = Some(floor.plan_image_url);
        self.rooms.clear();
        for room in floor.rooms {
            self.rooms.insert(room.id, room);
        }
    }

    /// The loaded floor's id, if any.
    #[must_use]
    pub fn floor_id(&self) -> Option<FloorId> {
        self.floor_id
    }

    /// The loaded floor's plan image URL, if any.
    #[must_use]
    pub fn plan_image_url(&self) -> Option<&str> {
        self.plan_image_url.as_deref()
    }

    /// Insert or replace a room. An existing room with the same id is
    /// overwritten.
    pub fn insert(&mut self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    /// Remove a room by id, returning it if it was present.
    pub fn remove(&mut self, id: &RoomId) -> Option<Room> {
        self.rooms.remove(id)
    }

    /// Return a reference to a room by id.
    #[must_use]
    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Replace a room's shape in place. Returns `false` if the room doesn't
    /// exist.
    pub fn replace_shape(&mut self, id: &RoomId, shape: Shape) -> bool {
        let Some(room) = self.rooms.get_mut(id) else {
            return false;
        };
        room.shape = shape;
        true
    }

    /// All rooms sorted by `(number, id)` for a stable draw order.
    #[must_use]
    pub fn sorted_rooms(&self) -> Vec<&Room> {
        let mut rooms: Vec<&Room> = self.rooms.values().collect();
        rooms.sort_by(|a, b| a.number.cmp(&b.number).then_with(|| a.id.cmp(&b.id)));
        rooms
    }

    /// Number of rooms in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns `true` if the snapshot holds no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
