//! Image service — stores uploaded plan images and hands back their URL.
//!
//! DESIGN
//! ======
//! One upload per new floor plan. Files land in the uploads directory under
//! a uuid-prefixed name (collisions impossible, original name preserved for
//! operators) and are served back by the static file layer at `/uploads`.
//! Only the final path component of the client-sent filename is ever used.

use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("empty image upload")]
    EmptyImage,
    #[error("invalid filename: {0}")]
    InvalidFilename(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `bytes` under `uploads_dir` and return the public URL path.
///
/// # Errors
///
/// Returns `EmptyImage` for a zero-byte body, `InvalidFilename` when the
/// name has no usable final component, or an IO error from the write.
pub async fn store_image(uploads_dir: &Path, filename: &str, bytes: &[u8]) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    let safe_name = sanitize_filename(filename)?;

    let stored_name = format!("{}-{safe_name}", Uuid::new_v4());
    let path: PathBuf = uploads_dir.join(&stored_name);

    tokio::fs::create_dir_all(uploads_dir).await?;
    tokio::fs::write(&path, bytes).await?;

    info!(name = %stored_name, size = bytes.len(), "plan image stored");
    Ok(format!("/uploads/{stored_name}"))
}

/// Reduce a client-sent filename to a safe final path component.
fn sanitize_filename(filename: &str) -> Result<String, ImageError> {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "." || base == ".." {
        return Err(ImageError::InvalidFilename(filename.to_string()));
    }
    Ok(base.to_string())
}

#[cfg(test)]
#[path = "image_test.rs"]
mod tests;
