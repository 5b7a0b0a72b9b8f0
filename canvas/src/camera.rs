//! Pan/zoom viewport and screen↔image coordinate conversions.
//!
//! The rendered plan layer is positioned as `screen = image · scale +
//! translate`, with `translate` in screen pixels. [`Viewport::screen_to_image`]
//! inverts exactly that transform; every hit-test and every new-point
//! placement must go through it. Feeding raw screen coordinates into geometry
//! is the classic pan/zoom bug this module exists to prevent.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{MAX_SCALE, MIN_SCALE, WHEEL_STEP};
use crate::geom::{ImagePoint, ScreenPoint};

/// Viewport state for pan/zoom over the rendered plan.
///
/// `scale` is clamped to `[MIN_SCALE, MAX_SCALE]`. `translate_x` /
/// `translate_y` are in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    dragging: bool,
    drag_anchor: ScreenPoint,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            dragging: false,
            drag_anchor: ScreenPoint::new(0.0, 0.0),
        }
    }
}

impl Viewport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pan gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Adjust scale by one wheel tick: positive `delta_y` (scroll down)
    /// zooms out, negative zooms in. Returns `true` if the scale changed.
    ///
    /// Clamping pins the scale to exactly `MIN_SCALE` / `MAX_SCALE` at the
    /// limits, so repeated ticks converge rather than drift.
    pub fn apply_wheel(&mut self, delta_y: f64) -> bool {
        let step = if delta_y > 0.0 { -WHEEL_STEP } else { WHEEL_STEP };
        let next = (self.scale + step).clamp(MIN_SCALE, MAX_SCALE);
        if (next - self.scale).abs() < f64::EPSILON {
            return false;
        }
        self.scale = next;
        true
    }

    /// Start a pan gesture at `screen`. Panning is only available when
    /// zoomed in (`scale > 1`); returns whether the gesture started.
    pub fn begin_drag(&mut self, screen: ScreenPoint) -> bool {
        if self.scale <= 1.0 {
            return false;
        }
        self.dragging = true;
        self.drag_anchor = ScreenPoint::new(screen.x - self.translate_x, screen.y - self.translate_y);
        true
    }

    /// Continue a pan gesture. Returns `true` if the translation changed;
    /// ignored when no gesture is in progress.
    pub fn continue_drag(&mut self, screen: ScreenPoint) -> bool {
        if !self.dragging {
            return false;
        }
        self.translate_x = screen.x - self.drag_anchor.x;
        self.translate_y = screen.y - self.drag_anchor.y;
        true
    }

    /// End the pan gesture, keeping the current translation.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Convert a screen-space point to the plan image's pixel space.
    #[must_use]
    pub fn screen_to_image(&self, screen: ScreenPoint) -> ImagePoint {
        ImagePoint {
            x: (screen.x - self.translate_x) / self.scale,
            y: (screen.y - self.translate_y) / self.scale,
        }
    }

    /// Convert an image-pixel point to screen space.
    #[must_use]
    pub fn image_to_screen(&self, image: ImagePoint) -> ScreenPoint {
        ScreenPoint {
            x: image.x * self.scale + self.translate_x,
            y: image.y * self.scale + self.translate_y,
        }
    }

    /// Convert a screen-space distance (pixels) to image-space distance.
    #[must_use]
    pub fn screen_dist_to_image(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Return to the neutral view: `scale = 1`, no translation.
    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translate_x = 0.0;
        self.translate_y = 0.0;
        self.dragging = false;
    }
}
