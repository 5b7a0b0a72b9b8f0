//! Input model: buttons, wheel deltas, draw modes, and the pointer-gesture
//! state machine.
//!
//! `InputState` tracks the gesture in progress between pointer-down and
//! pointer-up, carrying the context each gesture needs. Keeping it as one
//! explicit value (rather than flags captured in handler closures) makes
//! every transition a total function of the current state and the incoming
//! event.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::ScreenPoint;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Which kind of shape a drawing session produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Drag out an axis-aligned rectangle.
    #[default]
    Rect,
    /// Click out an arbitrary polygon.
    Polygon,
}

/// The pointer gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Panning the zoomed view. `pressed` is where the gesture started, used
    /// to tell a click from a drag on release.
    Panning {
        pressed: ScreenPoint,
    },
    /// Sizing a new rect between the drawing session's anchor and the
    /// pointer.
    SizingRect,
    /// Dragging one vertex of the bounds-edit polygon.
    DraggingVertex {
        index: usize,
    },
}
