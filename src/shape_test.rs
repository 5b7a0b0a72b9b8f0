use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point { x, y }
}

#[test]
fn rect_normalizes_to_itself() {
    let shape = Shape::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 };
    assert_eq!(shape.clone().normalized().unwrap(), shape);
}

#[test]
fn polygon_below_three_vertices_is_rejected() {
    let shape = Shape::Polygon {
        points: vec![pt(0.0, 0.0), pt(1.0, 1.0)],
        bounds: Bounds { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
    };
    assert_eq!(shape.normalized().unwrap_err(), ShapeError::InsufficientVertices(2));
}

#[test]
fn polygon_bounds_are_recomputed_from_vertices() {
    // Client-sent bounds are garbage; the store fixes them.
    let shape = Shape::Polygon {
        points: vec![pt(10.0, 5.0), pt(40.0, 15.0), pt(20.0, 45.0)],
        bounds: Bounds { x: 99.0, y: 99.0, width: 1.0, height: 1.0 },
    };
    let Shape::Polygon { bounds, .. } = shape.normalized().unwrap() else {
        panic!("expected polygon");
    };
    assert_eq!(bounds, Bounds { x: 10.0, y: 5.0, width: 30.0, height: 40.0 });
}

#[test]
fn shape_json_is_kind_tagged() {
    let rect = Shape::Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 };
    let value = serde_json::to_value(&rect).unwrap();
    assert_eq!(value.get("kind").and_then(|v| v.as_str()), Some("rect"));
    assert_eq!(value.get("x").and_then(serde_json::Value::as_f64), Some(1.0));

    let polygon = Shape::Polygon {
        points: vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(5.0, 8.0)],
        bounds: Bounds { x: 0.0, y: 0.0, width: 10.0, height: 8.0 },
    };
    let value = serde_json::to_value(&polygon).unwrap();
    assert_eq!(value.get("kind").and_then(|v| v.as_str()), Some("polygon"));
}

#[test]
fn shape_json_round_trip() {
    let polygon = Shape::Polygon {
        points: vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(5.0, 8.0)],
        bounds: Bounds { x: 0.0, y: 0.0, width: 10.0, height: 8.0 },
    };
    let json = serde_json::to_string(&polygon).unwrap();
    let back: Shape = serde_json::from_str(&json).unwrap();
    assert_eq!(back, polygon);
}

#[test]
fn unknown_kind_fails_to_parse() {
    let json = r#"{"kind":"blob","x":1.0}"#;
    assert!(serde_json::from_str::<Shape>(json).is_err());
}
