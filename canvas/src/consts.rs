//! Shared numeric constants for the canvas crate.

// ── Viewport ────────────────────────────────────────────────────

/// Lower zoom bound.
pub const MIN_SCALE: f64 = 0.5;

/// Upper zoom bound.
pub const MAX_SCALE: f64 = 3.0;

/// Scale change per wheel tick.
pub const WHEEL_STEP: f64 = 0.1;

// ── Shapes ──────────────────────────────────────────────────────

/// A polygon never has fewer vertices than this.
pub const MIN_POLYGON_VERTICES: usize = 3;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for vertex drag handles.
pub const VERTEX_HANDLE_RADIUS_PX: f64 = 8.0;

/// Screen-space hit slop in pixels for edge-midpoint insert handles.
pub const MIDPOINT_HANDLE_RADIUS_PX: f64 = 6.0;

/// Pointer travel in screen pixels below which a pan gesture still counts
/// as a click for room selection.
pub const CLICK_SLOP_PX: f64 = 3.0;
