//! Image upload route.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::services::image::{self, ImageError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// `POST /api/images?filename=` — raw image bytes in the body; responds
/// with the URL the plan can be fetched from.
pub async fn upload_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<serde_json::Value>), StatusCode> {
    let url = image::store_image(&state.uploads_dir, &query.filename, &body)
        .await
        .map_err(image_error_to_status)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "url": url }))))
}

pub(crate) fn image_error_to_status(err: ImageError) -> StatusCode {
    match err {
        ImageError::EmptyImage | ImageError::InvalidFilename(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ImageError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "images_test.rs"]
mod tests;
