//! Hit-testing against edit handles and room bodies.
//!
//! Handle tests run in image-pixel space so the slop radius is isotropic
//! (percent space stretches differently per axis on non-square plans); the
//! screen-space radius is divided by the viewport scale so handles feel the
//! same size at every zoom level. Room-body tests run in percent space
//! directly against the stored shapes.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{MIDPOINT_HANDLE_RADIUS_PX, VERTEX_HANDLE_RADIUS_PX};
use crate::doc::{FloorSnapshot, RoomId};
use crate::geom::{self, ImagePoint, PercentPoint};

/// What the pointer landed on inside an open bounds-edit session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandleHit {
    /// A draggable vertex handle.
    Vertex {
        index: usize,
    },
    /// An edge-midpoint insert handle, carrying the midpoint so the caller
    /// can splice it in without recomputing.
    EdgeMidpoint {
        edge: usize,
        midpoint: PercentPoint,
    },
}

/// Test the bounds-edit overlay handles under `pointer`.
///
/// Vertex handles win over midpoint handles, and lower indices win ties,
/// matching the draw order of the overlay. `scale` is the current viewport
/// scale; `image_width` / `image_height` are the plan's pixel dimensions.
#[must_use]
pub fn hit_handles(
    pointer: ImagePoint,
    vertices: &[PercentPoint],
    image_width: f64,
    image_height: f64,
    scale: f64,
) -> Option<HandleHit> {
    let vertex_slop = VERTEX_HANDLE_RADIUS_PX / scale;
    for (index, vertex) in vertices.iter().enumerate() {
        if within(pointer, vertex.to_image(image_width, image_height), vertex_slop) {
            return Some(HandleHit::Vertex { index });
        }
    }

    let midpoint_slop = MIDPOINT_HANDLE_RADIUS_PX / scale;
    for edge in 0..vertices.len() {
        let midpoint = geom::edge_midpoint(vertices, edge);
        if within(pointer, midpoint.to_image(image_width, image_height), midpoint_slop) {
            return Some(HandleHit::EdgeMidpoint { edge, midpoint });
        }
    }

    None
}

/// Test which room (if any) is under `pointer`, in percent space.
///
/// Rect shapes use AABB containment, polygon shapes the even-odd test (with
/// the derived bounds as a pre-filter). Rooms are checked in reverse draw
/// order so the visually topmost room wins overlaps.
#[must_use]
pub fn hit_room(pointer: PercentPoint, doc: &FloorSnapshot) -> Option<RoomId> {
    doc.sorted_rooms()
        .into_iter()
        .rev()
        .find(|room| room.shape.contains(pointer))
        .map(|room| room.id)
}

fn within(pointer: ImagePoint, target: ImagePoint, radius: f64) -> bool {
    let dx = pointer.x - target.x;
    let dy = pointer.y - target.y;
    dx * dx + dy * dy <= radius * radius
}
