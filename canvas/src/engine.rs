//! Top-level engine: composes the snapshot, viewport, drawing session, and
//! bounds editor, and routes input events to exactly one of them.
//!
//! Mode precedence, highest first: bounds-editing > drawing > viewing
//! (pan/select). An event that arrives for a lower-precedence mode while a
//! higher one owns the pointer is silently dropped — expected under fast
//! input, never surfaced as an error.
//!
//! Event handlers return [`Action`]s for the host to process. The engine
//! never mutates room data on its own: committed shapes leave as
//! [`Action::ShapeCommitted`] and re-enter through the `apply_*` methods
//! once the store has accepted them.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::bounds::BoundsEditor;
use crate::camera::Viewport;
use crate::consts::CLICK_SLOP_PX;
use crate::doc::{Floor, FloorSnapshot, Room, RoomId, Shape};
use crate::draw::DrawSession;
use crate::geom::{PercentPoint, ScreenPoint};
use crate::hit::{self, HandleHit};
use crate::input::{Button, DrawMode, InputState, WheelDelta};
use crate::render;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine calls for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A shape was committed: a brand-new one from the drawing session
    /// (`room_id` is `None`) or a replacement outline from the bounds editor
    /// (`room_id` names the room). The host persists it and feeds the
    /// accepted row back via [`EngineCore::apply_update`] /
    /// [`EngineCore::apply_create`].
    ShapeCommitted {
        room_id: Option<RoomId>,
        shape: Shape,
    },
    /// An active session was cancelled; nothing was kept.
    ShapeDiscarded,
    /// A room was clicked in viewing mode.
    RoomHit {
        id: RoomId,
    },
    /// Pan or zoom changed.
    ViewportChanged {
        scale: f64,
        translate_x: f64,
        translate_y: f64,
    },
    /// The host should set the CSS cursor.
    SetCursor(String),
    /// The scene needs repainting.
    RenderNeeded,
}

/// Which sub-component currently owns pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pan, zoom, hover, click-to-select.
    Viewing,
    /// A drawing session is active.
    Drawing,
    /// A bounds-editing session is open.
    EditingBounds,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without WASM/browser
/// dependencies.
pub struct EngineCore {
    pub doc: FloorSnapshot,
    pub camera: Viewport,
    pub draw: DrawSession,
    pub bounds: BoundsEditor,
    pub input: InputState,
    /// Room under the pointer, recomputed on every pointer-move in viewing
    /// mode. A render cache, not canonical state.
    pub hovered: Option<RoomId>,
    /// Last known pointer position, for preview overlays.
    pub cursor: Option<ScreenPoint>,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    /// Plan image pixel dimensions; zero until the image has loaded, and all
    /// coordinate-dependent input is ignored until then.
    pub image_width: f64,
    pub image_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: FloorSnapshot::new(),
            camera: Viewport::new(),
            draw: DrawSession::new(),
            bounds: BoundsEditor::new(),
            input: InputState::Idle,
            hovered: None,
            cursor: None,
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            image_width: 0.0,
            image_height: 0.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Replace the document with a floor snapshot. Any open drawing or
    /// editing session is dropped without emitting — the old floor's
    /// partial state is meaningless against the new one.
    pub fn load_snapshot(&mut self, floor: Floor) {
        self.doc.load(floor);
        self.draw.cancel();
        self.bounds.cancel();
        self.input = InputState::Idle;
        self.hovered = None;
    }

    /// Apply a store-accepted room creation.
    pub fn apply_create(&mut self, room: Room) {
        self.doc.insert(room);
    }

    /// Apply a store-accepted room update (full replacement row).
    pub fn apply_update(&mut self, room: Room) {
        self.doc.insert(room);
    }

    /// Apply a store-accepted room deletion.
    pub fn apply_delete(&mut self, id: &RoomId) {
        self.doc.remove(id);
        if self.hovered == Some(*id) {
            self.hovered = None;
        }
        if self.bounds.room_id() == Some(*id) {
            self.bounds.cancel();
            self.input = InputState::Idle;
        }
    }

    /// Record the plan image's natural pixel dimensions once it has loaded.
    pub fn set_image_size(&mut self, width: f64, height: f64) {
        self.image_width = width;
        self.image_height = height;
    }

    /// Update viewport CSS dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    // --- Queries ---

    /// The plan image's displayed dimensions at scale 1: the natural size
    /// fitted into the viewport (object-contain, anchored top-left), or the
    /// natural size itself before the viewport is known. `None` until the
    /// image has loaded — no coordinate conversion is possible before then.
    #[must_use]
    pub fn display_size(&self) -> Option<(f64, f64)> {
        if self.image_width <= 0.0 || self.image_height <= 0.0 {
            return None;
        }
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Some((self.image_width, self.image_height));
        }
        let fit = (self.viewport_width / self.image_width).min(self.viewport_height / self.image_height);
        Some((self.image_width * fit, self.image_height * fit))
    }

    /// Current input-routing mode, by precedence.
    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.bounds.is_editing() {
            Mode::EditingBounds
        } else if self.draw.is_active() {
            Mode::Drawing
        } else {
            Mode::Viewing
        }
    }

    /// The current viewport state.
    #[must_use]
    pub fn camera(&self) -> Viewport {
        self.camera
    }

    /// Look up a room by id.
    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.doc.get(id)
    }

    /// Whether the polygon in progress has enough vertices to finish —
    /// drives the host's "finish" button enablement.
    #[must_use]
    pub fn can_finish_polygon(&self) -> bool {
        self.draw.can_finish()
    }

    // --- Drawing session commands ---

    /// Start a drawing session in `mode`. Refused (no actions) while a
    /// bounds-editing session owns the pointer.
    pub fn begin_drawing(&mut self, mode: DrawMode) -> Vec<Action> {
        if self.bounds.is_editing() {
            return Vec::new();
        }
        self.draw.begin(mode);
        self.hovered = None;
        vec![Action::SetCursor("crosshair".into()), Action::RenderNeeded]
    }

    /// Switch the active drawing mode. Mid-draw switching clears the
    /// accumulated points (start over, never reinterpret).
    pub fn set_draw_mode(&mut self, mode: DrawMode) -> Vec<Action> {
        if !self.draw.is_active() {
            return Vec::new();
        }
        self.draw.set_mode(mode);
        self.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    /// Finish the in-progress polygon. Below three vertices this is a
    /// silent refusal — the host's finish affordance should already be
    /// disabled via [`Self::can_finish_polygon`].
    pub fn finish_polygon(&mut self) -> Vec<Action> {
        match self.draw.finish() {
            Ok(shape) => vec![
                Action::ShapeCommitted { room_id: None, shape },
                self.idle_cursor(),
                Action::RenderNeeded,
            ],
            Err(_) => Vec::new(),
        }
    }

    /// Cancel the drawing session, discarding accumulated points.
    pub fn cancel_drawing(&mut self) -> Vec<Action> {
        if !self.draw.cancel() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::ShapeDiscarded, self.idle_cursor(), Action::RenderNeeded]
    }

    // --- Bounds editor commands ---

    /// Open the bounds editor on a room. An active drawing session is
    /// discarded first (bounds editing takes precedence). Refused when the
    /// room is unknown.
    pub fn start_bounds_edit(&mut self, id: &RoomId) -> Vec<Action> {
        let Some(room) = self.doc.get(id) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        self.bounds.open(room);
        if self.draw.cancel() {
            actions.push(Action::ShapeDiscarded);
        }
        self.input = InputState::Idle;
        self.hovered = None;
        actions.push(Action::SetCursor("move".into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Commit the bounds edit, emitting the replacement shape. A session
    /// below three vertices refuses silently and stays open.
    pub fn save_bounds(&mut self) -> Vec<Action> {
        match self.bounds.save() {
            Ok((room_id, shape)) => {
                self.input = InputState::Idle;
                vec![
                    Action::ShapeCommitted { room_id: Some(room_id), shape },
                    self.idle_cursor(),
                    Action::RenderNeeded,
                ]
            }
            Err(_) => Vec::new(),
        }
    }

    /// Discard the bounds edit; the room's prior shape is untouched.
    pub fn cancel_bounds(&mut self) -> Vec<Action> {
        if !self.bounds.cancel() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        vec![Action::ShapeDiscarded, self.idle_cursor(), Action::RenderNeeded]
    }

    /// Delete a vertex of the open bounds edit (host affordance, e.g. a
    /// keyboard shortcut). Refusals at the three-vertex floor are silent.
    pub fn delete_bounds_vertex(&mut self, index: usize) -> Vec<Action> {
        match self.bounds.delete_vertex(index) {
            Ok(()) => vec![Action::RenderNeeded],
            Err(_) => Vec::new(),
        }
    }

    // --- Viewport commands ---

    /// Reset pan and zoom to the neutral view.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera.reset();
        vec![self.viewport_changed(), Action::RenderNeeded]
    }

    // --- Input events ---

    /// Pointer-down, routed by mode precedence.
    pub fn on_pointer_down(&mut self, screen: ScreenPoint, button: Button) -> Vec<Action> {
        self.cursor = Some(screen);
        match self.mode() {
            Mode::EditingBounds => self.pointer_down_editing(screen, button),
            Mode::Drawing => self.pointer_down_drawing(screen),
            Mode::Viewing => self.pointer_down_viewing(screen, button),
        }
    }

    /// Pointer-move: continues the gesture in progress, or recomputes hover
    /// when no gesture owns the pointer.
    pub fn on_pointer_move(&mut self, screen: ScreenPoint) -> Vec<Action> {
        self.cursor = Some(screen);
        match self.input {
            InputState::DraggingVertex { index } => {
                let Some(point) = self.screen_to_percent(screen) else {
                    return Vec::new();
                };
                if self.bounds.drag_vertex(index, point) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::SizingRect => vec![Action::RenderNeeded],
            InputState::Panning { .. } => {
                if self.camera.continue_drag(screen) {
                    vec![self.viewport_changed(), Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            InputState::Idle => {
                if self.mode() == Mode::Viewing {
                    self.recompute_hover(screen)
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Pointer-up: completes the gesture in progress.
    pub fn on_pointer_up(&mut self, screen: ScreenPoint, _button: Button) -> Vec<Action> {
        self.cursor = Some(screen);
        match std::mem::take(&mut self.input) {
            InputState::DraggingVertex { .. } => vec![Action::RenderNeeded],
            InputState::SizingRect => {
                let Some(point) = self.screen_to_percent(screen) else {
                    return Vec::new();
                };
                match self.draw.release(point) {
                    Some(shape) => vec![
                        Action::ShapeCommitted { room_id: None, shape },
                        Action::RenderNeeded,
                    ],
                    None => Vec::new(),
                }
            }
            InputState::Panning { pressed } => {
                self.camera.end_drag();
                let mut actions = vec![self.idle_cursor()];
                // A press that barely moved is a click, not a pan.
                let dx = screen.x - pressed.x;
                let dy = screen.y - pressed.y;
                if (dx * dx + dy * dy).sqrt() < CLICK_SLOP_PX {
                    actions.extend(self.click_hit(screen));
                }
                actions
            }
            InputState::Idle => {
                if self.mode() == Mode::Viewing {
                    self.click_hit(screen)
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Wheel zoom. Ignored while a bounds-editing session is open — editing
    /// geometry must not also re-scale the view mid-drag.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if self.bounds.is_editing() {
            return Vec::new();
        }
        if self.camera.apply_wheel(delta.dy) {
            vec![self.viewport_changed(), Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Routing helpers ---

    fn pointer_down_editing(&mut self, screen: ScreenPoint, button: Button) -> Vec<Action> {
        let Some((display_width, display_height)) = self.display_size() else {
            return Vec::new();
        };
        let pointer = self.camera.screen_to_image(screen);
        let hit = hit::hit_handles(
            pointer,
            self.bounds.points(),
            display_width,
            display_height,
            self.camera.scale,
        );
        match (button, hit) {
            (Button::Secondary, Some(HandleHit::Vertex { index })) => {
                // Refusal at the three-vertex floor is silent.
                match self.bounds.delete_vertex(index) {
                    Ok(()) => vec![Action::RenderNeeded],
                    Err(_) => Vec::new(),
                }
            }
            (Button::Primary, Some(HandleHit::Vertex { index })) => {
                self.input = InputState::DraggingVertex { index };
                vec![Action::SetCursor("move".into())]
            }
            (Button::Primary, Some(HandleHit::EdgeMidpoint { edge, midpoint })) => {
                if self.bounds.insert_vertex_after_edge(edge, midpoint) {
                    // The new vertex lands at edge + 1; drag it out directly.
                    self.input = InputState::DraggingVertex { index: edge + 1 };
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn pointer_down_drawing(&mut self, screen: ScreenPoint) -> Vec<Action> {
        let Some(point) = self.screen_to_percent(screen) else {
            return Vec::new();
        };
        self.draw.press(point);
        if self.draw.mode() == Some(DrawMode::Rect) {
            self.input = InputState::SizingRect;
        }
        vec![Action::RenderNeeded]
    }

    fn pointer_down_viewing(&mut self, screen: ScreenPoint, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if self.camera.begin_drag(screen) {
            self.input = InputState::Panning { pressed: screen };
            vec![Action::SetCursor("grabbing".into())]
        } else {
            Vec::new()
        }
    }

    fn recompute_hover(&mut self, screen: ScreenPoint) -> Vec<Action> {
        let hovered = self
            .screen_to_percent(screen)
            .and_then(|point| hit::hit_room(point, &self.doc));
        if hovered == self.hovered {
            return Vec::new();
        }
        self.hovered = hovered;
        let cursor = match hovered.and_then(|id| self.doc.get(&id)) {
            Some(room) if room.is_available() => Action::SetCursor("pointer".into()),
            Some(_) => Action::SetCursor("not-allowed".into()),
            None => self.idle_cursor(),
        };
        vec![cursor, Action::RenderNeeded]
    }

    fn click_hit(&self, screen: ScreenPoint) -> Vec<Action> {
        let Some(point) = self.screen_to_percent(screen) else {
            return Vec::new();
        };
        match hit::hit_room(point, &self.doc) {
            Some(id) => vec![Action::RoomHit { id }],
            None => Vec::new(),
        }
    }

    fn screen_to_percent(&self, screen: ScreenPoint) -> Option<PercentPoint> {
        let (display_width, display_height) = self.display_size()?;
        Some(
            self.camera
                .screen_to_image(screen)
                .to_percent(display_width, display_height),
        )
    }

    fn viewport_changed(&self) -> Action {
        Action::ViewportChanged {
            scale: self.camera.scale,
            translate_x: self.camera.translate_x,
            translate_y: self.camera.translate_y,
        }
    }

    fn idle_cursor(&self) -> Action {
        let cursor = match self.mode() {
            Mode::Drawing => "crosshair",
            Mode::EditingBounds => "move",
            Mode::Viewing if self.camera.scale > 1.0 => "grab",
            Mode::Viewing => "default",
        };
        Action::SetCursor(cursor.into())
    }
}

/// The full canvas engine. Wraps [`EngineCore`] and owns the browser canvas
/// element and the loaded plan image.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, image: None, core: EngineCore::new() }
    }

    /// Attach the loaded plan image and record its natural dimensions.
    pub fn set_plan_image(&mut self, image: HtmlImageElement) {
        self.core
            .set_image_size(f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.image = Some(image);
    }

    /// Update viewport dimensions, device pixel ratio, and the canvas
    /// backing-store size.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.canvas.set_width((width_css * dpr).max(1.0) as u32);
            self.canvas.set_height((height_css * dpr).max(1.0) as u32);
        }
    }

    // --- Delegated data inputs ---

    pub fn load_snapshot(&mut self, floor: Floor) {
        self.core.load_snapshot(floor);
    }

    pub fn apply_create(&mut self, room: Room) {
        self.core.apply_create(room);
    }

    pub fn apply_update(&mut self, room: Room) {
        self.core.apply_update(room);
    }

    pub fn apply_delete(&mut self, id: &RoomId) {
        self.core.apply_delete(id);
    }

    // --- Delegated commands ---

    pub fn begin_drawing(&mut self, mode: DrawMode) -> Vec<Action> {
        self.core.begin_drawing(mode)
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) -> Vec<Action> {
        self.core.set_draw_mode(mode)
    }

    pub fn finish_polygon(&mut self) -> Vec<Action> {
        self.core.finish_polygon()
    }

    pub fn cancel_drawing(&mut self) -> Vec<Action> {
        self.core.cancel_drawing()
    }

    pub fn start_bounds_edit(&mut self, id: &RoomId) -> Vec<Action> {
        self.core.start_bounds_edit(id)
    }

    pub fn save_bounds(&mut self) -> Vec<Action> {
        self.core.save_bounds()
    }

    pub fn cancel_bounds(&mut self) -> Vec<Action> {
        self.core.cancel_bounds()
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.core.reset_view()
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen: ScreenPoint, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen, button)
    }

    pub fn on_pointer_move(&mut self, screen: ScreenPoint) -> Vec<Action> {
        self.core.on_pointer_move(screen)
    }

    pub fn on_pointer_up(&mut self, screen: ScreenPoint, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen, button)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a canvas call
    /// fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core, self.image.as_ref())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.core.mode()
    }

    #[must_use]
    pub fn camera(&self) -> Viewport {
        self.core.camera()
    }

    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.core.room(id)
    }

    #[must_use]
    pub fn can_finish_polygon(&self) -> bool {
        self.core.can_finish_polygon()
    }
}
