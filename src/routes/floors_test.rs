use super::*;

#[test]
fn floor_error_to_status_maps_not_found() {
    let err = FloorError::NotFound(Uuid::nil());
    assert_eq!(floor_error_to_status(err), StatusCode::NOT_FOUND);
}

#[test]
fn floor_error_to_status_maps_duplicate_number() {
    let err = FloorError::DuplicateNumber(4);
    assert_eq!(floor_error_to_status(err), StatusCode::CONFLICT);
}

#[test]
fn create_floor_body_parses() {
    let body: CreateFloorBody =
        serde_json::from_str(r#"{"floor_number":2,"plan_image_url":"/uploads/x.png"}"#).unwrap();
    assert_eq!(body.floor_number, 2);
    assert_eq!(body.plan_image_url, "/uploads/x.png");
}

#[test]
fn create_floor_body_requires_image_url() {
    assert!(serde_json::from_str::<CreateFloorBody>(r#"{"floor_number":2}"#).is_err());
}

#[test]
fn duplicate_floor_body_parses() {
    let body: DuplicateFloorBody = serde_json::from_str(r#"{"new_floor_number":9}"#).unwrap();
    assert_eq!(body.new_floor_number, 9);
}
