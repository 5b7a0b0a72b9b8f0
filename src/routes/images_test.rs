use super::*;

#[test]
fn image_error_to_status_maps_bad_uploads() {
    assert_eq!(
        image_error_to_status(ImageError::EmptyImage),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        image_error_to_status(ImageError::InvalidFilename("..".to_string())),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[test]
fn image_error_to_status_maps_io_failures() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert_eq!(
        image_error_to_status(ImageError::Io(io)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn upload_query_requires_filename() {
    assert!(serde_json::from_str::<UploadQuery>("{}").is_err());
    let query: UploadQuery = serde_json::from_str(r#"{"filename":"plan.png"}"#).unwrap();
    assert_eq!(query.filename, "plan.png");
}
