//! Drawing session: accumulates a new room shape while the operator is
//! actively annotating.
//!
//! The session is a small state machine: `Idle` until [`DrawSession::begin`],
//! then active in one of two modes. Rect mode takes a press/release pair and
//! emits a min-corner-normalized rect; polygon mode accumulates one vertex
//! per press and emits on an explicit [`DrawSession::finish`]. Committed and
//! cancelled results are carried by return values, after which the session is
//! back in `Idle` with no partial state surviving.

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

use crate::consts::MIN_POLYGON_VERTICES;
use crate::doc::{Polygon, Shape};
use crate::geom::{PercentPoint, Rect};
use crate::input::DrawMode;

/// Failures from finishing a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    /// Finish was requested below the three-vertex minimum.
    #[error("polygon needs at least {MIN_POLYGON_VERTICES} vertices to finish, got {have}")]
    InsufficientVertices { have: usize },
    /// Finish was requested outside an active polygon session.
    #[error("no polygon drawing session is active")]
    NoActivePolygon,
}

#[derive(Debug, Clone, Default)]
enum DrawState {
    #[default]
    Idle,
    ActiveRect {
        anchor: Option<PercentPoint>,
    },
    ActivePolygon {
        points: Vec<PercentPoint>,
    },
}

/// The drawing state machine.
#[derive(Debug, Default)]
pub struct DrawSession {
    state: DrawState,
}

impl DrawSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the active state in `mode`, discarding any partial points.
    pub fn begin(&mut self, mode: DrawMode) {
        self.state = match mode {
            DrawMode::Rect => DrawState::ActiveRect { anchor: None },
            DrawMode::Polygon => DrawState::ActivePolygon { points: Vec::new() },
        };
    }

    /// Switch modes while active. Switching mid-draw means "start over":
    /// accumulated points are cleared, never reinterpreted. No-op when idle
    /// or when `mode` is already active.
    pub fn set_mode(&mut self, mode: DrawMode) {
        match (&self.state, mode) {
            (DrawState::ActiveRect { .. }, DrawMode::Polygon)
            | (DrawState::ActivePolygon { .. }, DrawMode::Rect) => self.begin(mode),
            _ => {}
        }
    }

    /// Whether a session is active in either mode.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self.state, DrawState::Idle)
    }

    /// The active mode, if any.
    #[must_use]
    pub fn mode(&self) -> Option<DrawMode> {
        match self.state {
            DrawState::Idle => None,
            DrawState::ActiveRect { .. } => Some(DrawMode::Rect),
            DrawState::ActivePolygon { .. } => Some(DrawMode::Polygon),
        }
    }

    /// Vertices accumulated so far in polygon mode (empty otherwise).
    #[must_use]
    pub fn points(&self) -> &[PercentPoint] {
        match &self.state {
            DrawState::ActivePolygon { points } => points,
            _ => &[],
        }
    }

    /// The rect-mode anchor recorded by the last press, if any.
    #[must_use]
    pub fn rect_anchor(&self) -> Option<PercentPoint> {
        match &self.state {
            DrawState::ActiveRect { anchor } => *anchor,
            _ => None,
        }
    }

    /// Preview rect between the anchor and the current pointer, for the
    /// in-progress overlay.
    #[must_use]
    pub fn preview_rect(&self, cursor: PercentPoint) -> Option<Rect> {
        self.rect_anchor()
            .map(|anchor| Rect::from_corners(anchor, cursor))
    }

    /// Pointer press at `point`: records the rect anchor, or appends a
    /// polygon vertex. Ignored when idle.
    pub fn press(&mut self, point: PercentPoint) {
        match &mut self.state {
            DrawState::Idle => {}
            DrawState::ActiveRect { anchor } => *anchor = Some(point),
            DrawState::ActivePolygon { points } => points.push(point),
        }
    }

    /// Pointer release at `point`. In rect mode with a recorded anchor this
    /// commits: the session returns to idle and emits the normalized rect
    /// (`x=min, y=min, width=|Δx|, height=|Δy|`). Degenerate zero-extent
    /// rects are emitted as-is; rejecting them is caller policy. Returns
    /// `None` in every other state.
    pub fn release(&mut self, point: PercentPoint) -> Option<Shape> {
        let DrawState::ActiveRect { anchor: Some(anchor) } = &self.state else {
            return None;
        };
        let anchor = *anchor;
        self.state = DrawState::Idle;
        Some(Shape::Rect(Rect::from_corners(anchor, point)))
    }

    /// Explicitly finish the polygon.
    ///
    /// On success the session returns to idle and emits the polygon with its
    /// derived bounding rect. On failure the session and its accumulated
    /// points are left untouched.
    ///
    /// # Errors
    ///
    /// [`DrawError::InsufficientVertices`] below three points;
    /// [`DrawError::NoActivePolygon`] when idle or in rect mode.
    pub fn finish(&mut self) -> Result<Shape, DrawError> {
        let DrawState::ActivePolygon { points } = &mut self.state else {
            return Err(DrawError::NoActivePolygon);
        };
        if points.len() < MIN_POLYGON_VERTICES {
            return Err(DrawError::InsufficientVertices { have: points.len() });
        }
        let taken = std::mem::take(points);
        self.state = DrawState::Idle;
        match Polygon::new(taken) {
            Ok(polygon) => Ok(Shape::Polygon(polygon)),
            // Arity is checked above, so this branch cannot run.
            Err(_) => Err(DrawError::NoActivePolygon),
        }
    }

    /// Whether [`Self::finish`] would currently succeed — drives the
    /// enabled state of the host's "finish" affordance.
    #[must_use]
    pub fn can_finish(&self) -> bool {
        matches!(&self.state, DrawState::ActivePolygon { points } if points.len() >= MIN_POLYGON_VERTICES)
    }

    /// Cancel the session, discarding all accumulated state. Returns whether
    /// a session was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = DrawState::Idle;
        was_active
    }
}
