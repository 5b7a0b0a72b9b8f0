use uuid::Uuid;

use super::*;
use crate::doc::{Polygon, Room, RoomStatus, Shape};
use crate::geom::Rect;

const IMG_W: f64 = 1000.0;
const IMG_H: f64 = 500.0;

fn pt(x: f64, y: f64) -> PercentPoint {
    PercentPoint::new(x, y)
}

fn ip(x: f64, y: f64) -> ImagePoint {
    ImagePoint::new(x, y)
}

fn make_room(number: &str, shape: Shape) -> Room {
    Room {
        id: Uuid::new_v4(),
        floor_id: Uuid::new_v4(),
        number: number.to_string(),
        category: "standard".to_string(),
        area: 30.0,
        capacity: 2,
        price: 100.0,
        status: RoomStatus::Available,
        shape,
        media: Vec::new(),
        amenities: Vec::new(),
    }
}

fn square_vertices() -> Vec<PercentPoint> {
    vec![pt(10.0, 10.0), pt(20.0, 10.0), pt(20.0, 20.0), pt(10.0, 20.0)]
}

// =============================================================
// hit_handles: vertices
// =============================================================

#[test]
fn vertex_hit_at_exact_position() {
    // Vertex (10%, 10%) of a 1000x500 image sits at (100, 50).
    let hit = hit_handles(ip(100.0, 50.0), &square_vertices(), IMG_W, IMG_H, 1.0);
    assert_eq!(hit, Some(HandleHit::Vertex { index: 0 }));
}

#[test]
fn vertex_hit_within_slop() {
    let hit = hit_handles(ip(105.0, 53.0), &square_vertices(), IMG_W, IMG_H, 1.0);
    assert_eq!(hit, Some(HandleHit::Vertex { index: 0 }));
}

#[test]
fn vertex_miss_outside_slop() {
    let hit = hit_handles(ip(112.0, 50.0), &square_vertices(), IMG_W, IMG_H, 1.0);
    assert_eq!(hit, None);
}

#[test]
fn vertex_slop_shrinks_with_zoom() {
    // 6 image-px off target: inside the 8 px slop at scale 1, outside the
    // 4 px slop at scale 2.
    let pointer = ip(106.0, 50.0);
    assert_eq!(
        hit_handles(pointer, &square_vertices(), IMG_W, IMG_H, 1.0),
        Some(HandleHit::Vertex { index: 0 })
    );
    assert_eq!(hit_handles(pointer, &square_vertices(), IMG_W, IMG_H, 2.0), None);
}

#[test]
fn lower_vertex_index_wins_ties() {
    // Two coincident vertices: the first in draw order is reported.
    let vertices = vec![pt(10.0, 10.0), pt(10.0, 10.0), pt(20.0, 20.0)];
    let hit = hit_handles(ip(100.0, 50.0), &vertices, IMG_W, IMG_H, 1.0);
    assert_eq!(hit, Some(HandleHit::Vertex { index: 0 }));
}

// =============================================================
// hit_handles: midpoints
// =============================================================

#[test]
fn midpoint_hit_between_vertices() {
    // Edge 0 runs (10%,10%) → (20%,10%); its midpoint (15%,10%) is at
    // (150, 50) in image pixels.
    let hit = hit_handles(ip(150.0, 50.0), &square_vertices(), IMG_W, IMG_H, 1.0);
    assert_eq!(
        hit,
        Some(HandleHit::EdgeMidpoint { edge: 0, midpoint: pt(15.0, 10.0) })
    );
}

#[test]
fn midpoint_of_closing_edge_wraps() {
    // Edge 3 closes (10%,20%) → (10%,10%): midpoint (10%,15%) = (100, 75).
    let hit = hit_handles(ip(100.0, 75.0), &square_vertices(), IMG_W, IMG_H, 1.0);
    assert_eq!(
        hit,
        Some(HandleHit::EdgeMidpoint { edge: 3, midpoint: pt(10.0, 15.0) })
    );
}

#[test]
fn vertex_wins_over_midpoint() {
    // A tiny edge whose midpoint handle overlaps its endpoints: the vertex
    // handle is checked first.
    let vertices = vec![pt(10.0, 10.0), pt(10.6, 10.0), pt(10.3, 10.5)];
    let hit = hit_handles(ip(103.0, 50.0), &vertices, IMG_W, IMG_H, 1.0);
    assert!(matches!(hit, Some(HandleHit::Vertex { .. })), "got {hit:?}");
}

#[test]
fn no_handles_on_empty_vertex_list() {
    let hit = hit_handles(ip(100.0, 50.0), &[], IMG_W, IMG_H, 1.0);
    assert_eq!(hit, None);
}

// =============================================================
// hit_room
// =============================================================

#[test]
fn rect_room_hit_by_aabb() {
    let mut doc = FloorSnapshot::new();
    let room = make_room("101", Shape::Rect(Rect::new(10.0, 10.0, 10.0, 10.0)));
    let id = room.id;
    doc.insert(room);

    assert_eq!(hit_room(pt(15.0, 15.0), &doc), Some(id));
    assert_eq!(hit_room(pt(25.0, 15.0), &doc), None);
}

#[test]
fn polygon_room_hit_by_even_odd() {
    let mut doc = FloorSnapshot::new();
    let polygon = Polygon::new(vec![pt(0.0, 0.0), pt(20.0, 0.0), pt(10.0, 20.0)]).unwrap();
    let room = make_room("102", Shape::Polygon(polygon));
    let id = room.id;
    doc.insert(room);

    assert_eq!(hit_room(pt(10.0, 5.0), &doc), Some(id));
    // Inside the bounding rect but outside the triangle.
    assert_eq!(hit_room(pt(1.0, 18.0), &doc), None);
}

#[test]
fn topmost_room_wins_overlap() {
    // "102" draws after "101", so it is visually on top and wins the hit.
    let mut doc = FloorSnapshot::new();
    let under = make_room("101", Shape::Rect(Rect::new(0.0, 0.0, 20.0, 20.0)));
    let over = make_room("102", Shape::Rect(Rect::new(10.0, 10.0, 20.0, 20.0)));
    let over_id = over.id;
    let under_id = under.id;
    doc.insert(under);
    doc.insert(over);

    assert_eq!(hit_room(pt(15.0, 15.0), &doc), Some(over_id));
    assert_eq!(hit_room(pt(5.0, 5.0), &doc), Some(under_id));
}

#[test]
fn hit_room_on_empty_snapshot_is_none() {
    let doc = FloorSnapshot::new();
    assert_eq!(hit_room(pt(5.0, 5.0), &doc), None);
}
