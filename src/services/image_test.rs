use super::*;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("floorboard-image-test-{}", Uuid::new_v4()))
}

#[tokio::test]
async fn stores_bytes_and_returns_uploads_url() {
    let dir = scratch_dir();
    let url = store_image(&dir, "plan.png", b"not-really-a-png").await.unwrap();

    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with("-plan.png"));

    let stored_name = url.trim_start_matches("/uploads/");
    let on_disk = tokio::fs::read(dir.join(stored_name)).await.unwrap();
    assert_eq!(on_disk, b"not-really-a-png");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn distinct_uploads_of_the_same_name_do_not_collide() {
    let dir = scratch_dir();
    let a = store_image(&dir, "plan.png", b"first").await.unwrap();
    let b = store_image(&dir, "plan.png", b"second").await.unwrap();
    assert_ne!(a, b);
    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn path_components_are_stripped_from_filenames() {
    let dir = scratch_dir();
    let url = store_image(&dir, "../../etc/plan.png", b"bytes").await.unwrap();
    assert!(url.ends_with("-plan.png"));
    // The file landed inside the uploads dir, nowhere else.
    let stored_name = url.trim_start_matches("/uploads/");
    assert!(dir.join(stored_name).exists());
    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn empty_body_is_rejected() {
    let err = store_image(&scratch_dir(), "plan.png", b"").await.unwrap_err();
    assert!(matches!(err, ImageError::EmptyImage));
}

#[tokio::test]
async fn filename_with_no_usable_component_is_rejected() {
    for bad in ["", "   ", "..", "uploads/"] {
        let err = store_image(&scratch_dir(), bad, b"bytes").await.unwrap_err();
        assert!(matches!(err, ImageError::InvalidFilename(_)), "accepted {bad:?}");
    }
}
