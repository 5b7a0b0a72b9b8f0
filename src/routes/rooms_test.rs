use super::*;
use crate::shape::ShapeError;

#[test]
fn room_error_to_status_maps_not_found() {
    assert_eq!(
        room_error_to_status(RoomError::NotFound(Uuid::nil())),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        room_error_to_status(RoomError::FloorNotFound(Uuid::nil())),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn room_error_to_status_maps_conflict() {
    let err = RoomError::DuplicateNumber { floor_id: Uuid::nil(), number: "204".to_string() };
    assert_eq!(room_error_to_status(err), StatusCode::CONFLICT);
}

#[test]
fn room_error_to_status_maps_validation_failures() {
    assert_eq!(
        room_error_to_status(RoomError::InvalidShape(ShapeError::InsufficientVertices(2))),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        room_error_to_status(RoomError::InvalidStatus("booked".to_string())),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[test]
fn list_rooms_query_parses_optional_floor() {
    let query: ListRoomsQuery = serde_json::from_str("{}").unwrap();
    assert!(query.floor_id.is_none());

    let id = Uuid::new_v4();
    let query: ListRoomsQuery =
        serde_json::from_str(&format!(r#"{{"floor_id":"{id}"}}"#)).unwrap();
    assert_eq!(query.floor_id, Some(id));
}
