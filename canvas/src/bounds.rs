//! Bounds editor: session for reshaping an existing room's outline.
//!
//! Opening the editor copies the room's shape into a mutable vertex list —
//! polygons verbatim, rects as four synthesized clockwise corners. Every
//! saved edit therefore yields a polygon; a rect that is never bounds-edited
//! stays a rect. Vertex mutations use explicit index semantics:
//! [`BoundsEditor::insert_vertex_after_edge`] splices between edge endpoints
//! (shifting later indices up by one), [`BoundsEditor::delete_vertex`]
//! removes one vertex (shifting later indices down) and refuses to breach
//! the three-vertex floor, leaving the list untouched on refusal.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::consts::MIN_POLYGON_VERTICES;
use crate::doc::{Polygon, Room, RoomId, Shape};
use crate::geom::PercentPoint;

/// Failures from vertex deletion and saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundsError {
    /// Deleting this vertex would leave fewer than three.
    #[error("deleting would leave {have} vertices; {MIN_POLYGON_VERTICES} is the minimum")]
    MinimumVerticesViolation { have: usize },
    /// Saving was requested below the three-vertex minimum. Should be
    /// unreachable given the delete guard, re-checked defensively.
    #[error("cannot save with {have} vertices; {MIN_POLYGON_VERTICES} is the minimum")]
    InsufficientVertices { have: usize },
    /// A mutation named a vertex index past the end of the list.
    #[error("vertex index {0} is out of range")]
    VertexOutOfRange(usize),
    /// No editing session is open.
    #[error("no bounds-editing session is open")]
    NotEditing,
}

#[derive(Debug, Default)]
enum EditState {
    #[default]
    Closed,
    Editing {
        room_id: RoomId,
        points: Vec<PercentPoint>,
    },
}

/// The bounds-editing state machine.
#[derive(Debug, Default)]
pub struct BoundsEditor {
    state: EditState,
}

impl BoundsEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an editing session seeded from the room's current shape.
    ///
    /// A polygon's vertices are copied verbatim; a rect becomes its four
    /// corners in clockwise order (top-left, top-right, bottom-right,
    /// bottom-left). Opening while a session is already in progress discards
    /// that session first.
    pub fn open(&mut self, room: &Room) {
        let points = match &room.shape {
            Shape::Polygon(polygon) => polygon.points().to_vec(),
            Shape::Rect(rect) => rect.corners().to_vec(),
        };
        self.state = EditState::Editing { room_id: room.id, points };
    }

    /// Whether an editing session is open.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// The room being edited, if any.
    #[must_use]
    pub fn room_id(&self) -> Option<RoomId> {
        match self.state {
            EditState::Closed => None,
            EditState::Editing { room_id, .. } => Some(room_id),
        }
    }

    /// The working vertex list (empty when closed).
    #[must_use]
    pub fn points(&self) -> &[PercentPoint] {
        match &self.state {
            EditState::Closed => &[],
            EditState::Editing { points, .. } => points,
        }
    }

    /// Replace vertex `index` with `point`, unconditionally — no clamping to
    /// the image frame; off-frame vertices are legal. Returns `false` when
    /// closed or when `index` is out of range.
    pub fn drag_vertex(&mut self, index: usize, point: PercentPoint) -> bool {
        let EditState::Editing { points, .. } = &mut self.state else {
            return false;
        };
        let Some(vertex) = points.get_mut(index) else {
            return false;
        };
        *vertex = point;
        true
    }

    /// Insert `point` as a new vertex between `edge` and `edge + 1`.
    ///
    /// Typically called with the edge's midpoint (the insert handle), but
    /// any point is accepted, which lets a new corner be dragged out in one
    /// gesture. Returns `false` when closed or when `edge` is out of range.
    pub fn insert_vertex_after_edge(&mut self, edge: usize, point: PercentPoint) -> bool {
        let EditState::Editing { points, .. } = &mut self.state else {
            return false;
        };
        if edge >= points.len() {
            return false;
        }
        points.insert(edge + 1, point);
        true
    }

    /// Remove vertex `index`.
    ///
    /// # Errors
    ///
    /// [`BoundsError::MinimumVerticesViolation`] when the result would drop
    /// below three vertices — the list is left untouched, not partially
    /// mutated. [`BoundsError::NotEditing`] when no session is open.
    pub fn delete_vertex(&mut self, index: usize) -> Result<(), BoundsError> {
        let EditState::Editing { points, .. } = &mut self.state else {
            return Err(BoundsError::NotEditing);
        };
        if index >= points.len() {
            return Err(BoundsError::VertexOutOfRange(index));
        }
        if points.len() <= MIN_POLYGON_VERTICES {
            return Err(BoundsError::MinimumVerticesViolation { have: points.len() });
        }
        points.remove(index);
        Ok(())
    }

    /// Commit the edit: emits the room id and its replacement polygon (with
    /// freshly derived bounds) and closes the session. On failure the
    /// session stays open with its vertices intact.
    ///
    /// # Errors
    ///
    /// [`BoundsError::InsufficientVertices`] below three vertices;
    /// [`BoundsError::NotEditing`] when no session is open.
    pub fn save(&mut self) -> Result<(RoomId, Shape), BoundsError> {
        let EditState::Editing { room_id, points } = &mut self.state else {
            return Err(BoundsError::NotEditing);
        };
        if points.len() < MIN_POLYGON_VERTICES {
            return Err(BoundsError::InsufficientVertices { have: points.len() });
        }
        let room_id = *room_id;
        let taken = std::mem::take(points);
        self.state = EditState::Closed;
        match Polygon::new(taken) {
            Ok(polygon) => Ok((room_id, Shape::Polygon(polygon))),
            // Arity is checked above, so this branch cannot run.
            Err(_) => Err(BoundsError::NotEditing),
        }
    }

    /// Discard the session; the room's prior shape is untouched. Returns
    /// whether a session was open.
    pub fn cancel(&mut self) -> bool {
        let was_editing = self.is_editing();
        self.state = EditState::Closed;
        was_editing
    }
}
