use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_equality() {
    assert_eq!(Button::Primary, Button::Primary);
    assert_ne!(Button::Primary, Button::Secondary);
    assert_ne!(Button::Middle, Button::Secondary);
}

#[test]
fn button_all_variants_distinct() {
    let variants = [Button::Primary, Button::Middle, Button::Secondary];
    for (i, a) in variants.iter().enumerate() {
        for (j, b) in variants.iter().enumerate() {
            if i == j {
                assert_eq!(a, b);
            } else {
                assert_ne!(a, b);
            }
        }
    }
}

// =============================================================
// WheelDelta
// =============================================================

#[test]
fn wheel_delta_values() {
    let w = WheelDelta { dx: 1.5, dy: -3.0 };
    assert!((w.dx - 1.5).abs() < f64::EPSILON);
    assert!((w.dy + 3.0).abs() < f64::EPSILON);
}

#[test]
fn wheel_delta_clone_and_copy() {
    let a = WheelDelta { dx: 1.0, dy: 2.0 };
    let b = a;
    assert!((a.dx - b.dx).abs() < f64::EPSILON);
    assert!((a.dy - b.dy).abs() < f64::EPSILON);
}

// =============================================================
// DrawMode
// =============================================================

#[test]
fn draw_mode_default_is_rect() {
    assert_eq!(DrawMode::default(), DrawMode::Rect);
}

#[test]
fn draw_mode_equality() {
    assert_eq!(DrawMode::Polygon, DrawMode::Polygon);
    assert_ne!(DrawMode::Rect, DrawMode::Polygon);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert_eq!(InputState::default(), InputState::Idle);
}

#[test]
fn input_state_take_resets_to_idle() {
    let mut state = InputState::DraggingVertex { index: 2 };
    let taken = std::mem::take(&mut state);
    assert_eq!(taken, InputState::DraggingVertex { index: 2 });
    assert_eq!(state, InputState::Idle);
}

#[test]
fn input_state_panning_carries_press_point() {
    let state = InputState::Panning { pressed: ScreenPoint::new(40.0, 60.0) };
    let InputState::Panning { pressed } = state else {
        panic!("expected panning, got {state:?}");
    };
    assert!((pressed.x - 40.0).abs() < f64::EPSILON);
    assert!((pressed.y - 60.0).abs() < f64::EPSILON);
}

#[test]
fn input_state_variants_distinct() {
    let pressed = ScreenPoint::new(0.0, 0.0);
    assert_ne!(InputState::Idle, InputState::SizingRect);
    assert_ne!(InputState::Idle, InputState::Panning { pressed });
    assert_ne!(InputState::SizingRect, InputState::DraggingVertex { index: 0 });
    assert_ne!(
        InputState::DraggingVertex { index: 0 },
        InputState::DraggingVertex { index: 1 }
    );
}
