//! Shape — the wire and storage form of a room's spatial footprint.
//!
//! DESIGN
//! ======
//! A shape is a tagged union: an axis-aligned rect or a polygon of at least
//! three vertices carrying its bounding rect. Coordinates are percent of the
//! floor-plan image's dimensions, which keeps every stored shape valid no
//! matter what pixel size the plan is rendered at. The canvas engine speaks
//! the same JSON representation.
//!
//! The store is the validation boundary: every shape is checked and
//! normalized (polygon bounds recomputed server-side) before it is written,
//! so no sub-three-vertex polygon and no stale bounds can enter the system.

use serde::{Deserialize, Serialize};

/// Minimum vertex count for a polygon shape.
pub const MIN_POLYGON_VERTICES: usize = 3;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("polygon needs at least {MIN_POLYGON_VERTICES} vertices, got {0}")]
    InsufficientVertices(usize),
}

/// A vertex in percent-of-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounds: min corner plus extent, percent coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A room's spatial footprint as stored in the `rooms.shape` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Polygon {
        points: Vec<Point>,
        bounds: Bounds,
    },
}

impl Shape {
    /// Validate invariants and recompute derived data.
    ///
    /// Rects pass through unchanged. Polygon bounds are recomputed from the
    /// vertices — client-sent bounds are never trusted.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::InsufficientVertices`] for a polygon below
    /// three vertices.
    pub fn normalized(self) -> Result<Self, ShapeError> {
        match self {
            Self::Rect { .. } => Ok(self),
            Self::Polygon { points, .. } => {
                if points.len() < MIN_POLYGON_VERTICES {
                    return Err(ShapeError::InsufficientVertices(points.len()));
                }
                let bounds = bounds_of(&points);
                Ok(Self::Polygon { points, bounds })
            }
        }
    }
}

fn bounds_of(points: &[Point]) -> Bounds {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Bounds { x: min_x, y: min_y, width: max_x - min_x, height: max_y - min_y }
}

#[cfg(test)]
#[path = "shape_test.rs"]
mod tests;
