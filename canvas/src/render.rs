//! Rendering: draws the full floor-plan scene to a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives a read-only view of the
//! engine state and produces pixels — it does not mutate anything.
//!
//! Layer order: plan image, committed room shapes, the in-progress drawing
//! overlay, then the bounds-edit overlay. All drawing happens in display
//! pixel space (the fitted image at scale 1) under the viewport's
//! translate+scale transform; handle radii are divided by the scale so they
//! stay the same size on screen at every zoom, matching the hit-test slop.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the
//! result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{MIDPOINT_HANDLE_RADIUS_PX, VERTEX_HANDLE_RADIUS_PX};
use crate::doc::{Room, RoomStatus, Shape};
use crate::engine::EngineCore;
use crate::geom::{ImagePoint, PercentPoint, Rect};

/// Accent color for drawing and editing overlays.
const OVERLAY_STROKE: &str = "#3b82f6";
/// Fill for the bounds-edit polygon.
const OVERLAY_FILL: &str = "rgba(59, 130, 246, 0.2)";
/// Edge-midpoint insert handles.
const MIDPOINT_FILL: &str = "#10b981";
/// Room label text.
const LABEL_FILL: &str = "#ffffff";

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    image: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    let camera = core.camera;

    // Layer 0: clear in device pixels, then enter display space.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.translate(camera.translate_x, camera.translate_y)?;
    ctx.scale(camera.scale, camera.scale)?;

    let Some((display_w, display_h)) = core.display_size() else {
        return Ok(());
    };

    // Layer 1: plan image, fitted to the viewport.
    if let Some(image) = image {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, display_w, display_h)?;
    }

    // Layer 2: committed rooms. The room being bounds-edited is skipped;
    // its working outline is drawn by the edit overlay instead.
    for room in core.doc.sorted_rooms() {
        if core.bounds.room_id() == Some(room.id) {
            continue;
        }
        draw_room(ctx, room, core.hovered == Some(room.id), display_w, display_h)?;
    }

    // Layer 3: drawing overlay.
    draw_drawing_overlay(ctx, core, display_w, display_h)?;

    // Layer 4: bounds-edit overlay.
    draw_bounds_overlay(ctx, core, display_w, display_h)?;

    Ok(())
}

// =============================================================
// Rooms
// =============================================================

fn draw_room(
    ctx: &CanvasRenderingContext2d,
    room: &Room,
    hovered: bool,
    display_w: f64,
    display_h: f64,
) -> Result<(), JsValue> {
    ctx.set_fill_style_str(status_fill(room.status, hovered));
    ctx.set_stroke_style_str(status_stroke(room.status));
    ctx.set_line_width(2.0);

    match &room.shape {
        Shape::Rect(rect) => {
            let (origin, extent) = rect_to_display(*rect, display_w, display_h);
            ctx.fill_rect(origin.x, origin.y, extent.x, extent.y);
            ctx.stroke_rect(origin.x, origin.y, extent.x, extent.y);
        }
        Shape::Polygon(polygon) => {
            trace_polygon(ctx, polygon.points(), display_w, display_h);
            ctx.fill();
            ctx.stroke();
        }
    }

    draw_room_label(ctx, room, display_w, display_h)
}

fn draw_room_label(
    ctx: &CanvasRenderingContext2d,
    room: &Room,
    display_w: f64,
    display_h: f64,
) -> Result<(), JsValue> {
    // Rect labels sit at the box center, polygon labels at the vertex mean.
    let center = match &room.shape {
        Shape::Rect(rect) => {
            PercentPoint::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
        }
        Shape::Polygon(polygon) => match crate::geom::centroid(polygon.points()) {
            Ok(center) => center,
            Err(_) => return Ok(()),
        },
    };
    let center = center.to_image(display_w, display_h);
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.set_font("bold 14px sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(&room.number, center.x, center.y)
}

fn status_fill(status: RoomStatus, hovered: bool) -> &'static str {
    match (status, hovered) {
        (RoomStatus::Available, true) => "rgba(34, 197, 94, 0.6)",
        (RoomStatus::Available, false) => "rgba(34, 197, 94, 0.3)",
        (RoomStatus::Occupied, _) => "rgba(239, 68, 68, 0.3)",
        (RoomStatus::Maintenance, _) => "rgba(251, 146, 60, 0.3)",
    }
}

fn status_stroke(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Available => "rgb(34, 197, 94)",
        RoomStatus::Occupied => "rgb(239, 68, 68)",
        RoomStatus::Maintenance => "rgb(251, 146, 60)",
    }
}

// =============================================================
// Drawing overlay
// =============================================================

fn draw_drawing_overlay(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    display_w: f64,
    display_h: f64,
) -> Result<(), JsValue> {
    if !core.draw.is_active() {
        return Ok(());
    }

    ctx.set_stroke_style_str(OVERLAY_STROKE);
    ctx.set_line_width(2.0 / core.camera.scale);
    set_dash(ctx, &[5.0 / core.camera.scale, 5.0 / core.camera.scale])?;

    // Rect preview between the anchor and the pointer.
    let preview = core
        .cursor
        .map(|screen| core.camera.screen_to_image(screen).to_percent(display_w, display_h))
        .and_then(|pointer| core.draw.preview_rect(pointer));
    if let Some(rect) = preview {
        let (origin, extent) = rect_to_display(rect, display_w, display_h);
        ctx.set_fill_style_str(OVERLAY_FILL);
        ctx.fill_rect(origin.x, origin.y, extent.x, extent.y);
        ctx.stroke_rect(origin.x, origin.y, extent.x, extent.y);
    }

    // Polygon-in-progress polyline and vertex dots.
    let points = core.draw.points();
    if !points.is_empty() {
        ctx.begin_path();
        let first = points[0].to_image(display_w, display_h);
        ctx.move_to(first.x, first.y);
        for p in &points[1..] {
            let p = p.to_image(display_w, display_h);
            ctx.line_to(p.x, p.y);
        }
        ctx.stroke();

        set_dash(ctx, &[])?;
        ctx.set_fill_style_str(OVERLAY_STROKE);
        for p in points {
            let p = p.to_image(display_w, display_h);
            fill_circle(ctx, p, 4.0 / core.camera.scale)?;
        }
    }

    set_dash(ctx, &[])
}

// =============================================================
// Bounds-edit overlay
// =============================================================

fn draw_bounds_overlay(
    ctx: &CanvasRenderingContext2d,
    core: &EngineCore,
    display_w: f64,
    display_h: f64,
) -> Result<(), JsValue> {
    let points = core.bounds.points();
    if points.is_empty() {
        return Ok(());
    }

    // Working polygon.
    trace_polygon(ctx, points, display_w, display_h);
    ctx.set_fill_style_str(OVERLAY_FILL);
    ctx.fill();
    ctx.set_stroke_style_str(OVERLAY_STROKE);
    ctx.set_line_width(3.0 / core.camera.scale);
    set_dash(ctx, &[8.0 / core.camera.scale, 4.0 / core.camera.scale])?;
    ctx.stroke();
    set_dash(ctx, &[])?;

    // Midpoint insert handles, under the vertex handles.
    ctx.set_stroke_style_str("#ffffff");
    ctx.set_line_width(2.0 / core.camera.scale);
    ctx.set_fill_style_str(MIDPOINT_FILL);
    for edge in 0..points.len() {
        let midpoint = crate::geom::edge_midpoint(points, edge).to_image(display_w, display_h);
        fill_circle(ctx, midpoint, MIDPOINT_HANDLE_RADIUS_PX / core.camera.scale)?;
        ctx.stroke();
    }

    // Vertex drag handles.
    ctx.set_fill_style_str(OVERLAY_STROKE);
    for p in points {
        let p = p.to_image(display_w, display_h);
        fill_circle(ctx, p, VERTEX_HANDLE_RADIUS_PX / core.camera.scale)?;
        ctx.stroke();
    }

    Ok(())
}

// =============================================================
// Primitives
// =============================================================

fn trace_polygon(
    ctx: &CanvasRenderingContext2d,
    points: &[PercentPoint],
    display_w: f64,
    display_h: f64,
) {
    ctx.begin_path();
    if let Some((first, rest)) = points.split_first() {
        let first = first.to_image(display_w, display_h);
        ctx.move_to(first.x, first.y);
        for p in rest {
            let p = p.to_image(display_w, display_h);
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.close_path();
}

fn fill_circle(ctx: &CanvasRenderingContext2d, center: ImagePoint, radius: f64) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}

fn rect_to_display(rect: Rect, display_w: f64, display_h: f64) -> (ImagePoint, ImagePoint) {
    let origin = PercentPoint::new(rect.x, rect.y).to_image(display_w, display_h);
    let extent = PercentPoint::new(rect.width, rect.height).to_image(display_w, display_h);
    (origin, extent)
}

fn set_dash(ctx: &CanvasRenderingContext2d, segments: &[f64]) -> Result<(), JsValue> {
    let array = js_sys::Array::new();
    for s in segments {
        array.push(&JsValue::from_f64(*s));
    }
    ctx.set_line_dash(&array)
}
