//! Coordinate spaces and pure geometry.
//!
//! Three point types keep the coordinate spaces apart at the type level:
//! [`ScreenPoint`] (viewport CSS pixels, input side), [`ImagePoint`] (the plan
//! image's own pixel space, transient), and [`PercentPoint`] (percent of the
//! image's dimensions, the only space shapes are stored in). A value can only
//! move between spaces through the named conversion functions here and on
//! [`crate::camera::Viewport`], so a point can never be consumed in the wrong
//! space by accident.
//!
//! Everything in this module is a pure function of its inputs.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in viewport CSS-pixel space, as reported by pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in the plan image's own pixel space.
///
/// Produced by [`crate::camera::Viewport::screen_to_image`] and by
/// [`PercentPoint::to_image`]; consumed immediately and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to percent space given the image's pixel dimensions.
    ///
    /// Inverse of [`PercentPoint::to_image`]; the round trip is exact to
    /// floating-point tolerance. Dimensions must be non-zero.
    #[must_use]
    pub fn to_percent(self, image_width: f64, image_height: f64) -> PercentPoint {
        PercentPoint {
            x: self.x / image_width * 100.0,
            y: self.y / image_height * 100.0,
        }
    }
}

/// A point in percent-of-image space.
///
/// Both axes run 0–100 across the plan image. Values outside that range are
/// legal (vertices dragged off-frame) and simply render outside the visible
/// area. This is the canonical space: every persisted shape is made of these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert to image-pixel space given the image's pixel dimensions.
    #[must_use]
    pub fn to_image(self, image_width: f64, image_height: f64) -> ImagePoint {
        ImagePoint {
            x: self.x / 100.0 * image_width,
            y: self.y / 100.0 * image_height,
        }
    }
}

/// An axis-aligned rectangle in percent space: min corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a normalized rect from two opposite corners, in any drag order.
    #[must_use]
    pub fn from_corners(a: PercentPoint, b: PercentPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Containment test, half-open: min edges are inside, max edges are not.
    ///
    /// Matches the boundary convention of [`point_in_polygon`] so a rect and
    /// its four-corner polygon agree on every point.
    #[must_use]
    pub fn contains(&self, p: PercentPoint) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// The four corners in clockwise order: top-left, top-right,
    /// bottom-right, bottom-left.
    #[must_use]
    pub fn corners(&self) -> [PercentPoint; 4] {
        [
            PercentPoint::new(self.x, self.y),
            PercentPoint::new(self.x + self.width, self.y),
            PercentPoint::new(self.x + self.width, self.y + self.height),
            PercentPoint::new(self.x, self.y + self.height),
        ]
    }
}

/// Failures from the point-set reducers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A reducer was handed an empty point set.
    #[error("empty point set")]
    EmptyPointSet,
}

/// Axis-aligned bounding rect of a point set.
///
/// # Errors
///
/// Returns [`GeometryError::EmptyPointSet`] when `points` is empty.
pub fn bounding_rect(points: &[PercentPoint]) -> Result<Rect, GeometryError> {
    let first = points.first().ok_or(GeometryError::EmptyPointSet)?;
    let mut min_x = first.x;
    let mut min_y = first.y;
    let mut max_x = first.x;
    let mut max_y = first.y;
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Ok(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Arithmetic mean of a point set.
///
/// # Errors
///
/// Returns [`GeometryError::EmptyPointSet`] when `points` is empty.
pub fn centroid(points: &[PercentPoint]) -> Result<PercentPoint, GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::EmptyPointSet);
    }
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Ok(PercentPoint::new(sum_x / n, sum_y / n))
}

/// Even-odd ray-casting containment test against an implicitly closed polygon.
///
/// Boundary convention is half-open: a point on a minimum-coordinate edge
/// (left or top, in image orientation) is inside, on a maximum-coordinate
/// edge outside. Callers must not invoke this with fewer than
/// [`crate::consts::MIN_POLYGON_VERTICES`] vertices; below that everything
/// is outside.
#[must_use]
pub fn point_in_polygon(point: PercentPoint, polygon: &[PercentPoint]) -> bool {
    if polygon.len() < crate::consts::MIN_POLYGON_VERTICES {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y) {
            let x_at = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_at {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Midpoint of the polygon edge from vertex `edge` to vertex
/// `(edge + 1) % len`.
///
/// `edge` must be a valid vertex index.
#[must_use]
pub fn edge_midpoint(polygon: &[PercentPoint], edge: usize) -> PercentPoint {
    let a = polygon[edge];
    let b = polygon[(edge + 1) % polygon.len()];
    PercentPoint::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
