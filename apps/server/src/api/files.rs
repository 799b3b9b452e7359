//! Stored file serving.

use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::Category;
use crate::services::Storage;

/// Serve a stored file from a category directory.
///
/// The name must address a regular file directly inside the directory;
/// anything else is reported as not found. Content type follows the extension.
pub async fn serve_stored(
    req: &HttpRequest,
    storage: &Storage,
    category: Category,
    filename: &str,
) -> AppResult<HttpResponse> {
    let path = storage.resolve(category, filename)?;

    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(AppError::NotFound(format!("File {}", filename)));
    }

    debug!("Serving {} from {}", filename, category);

    let file = NamedFile::open_async(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(format!("File {}", filename))
        } else {
            AppError::FileSystem(format!("Failed to open {}: {}", filename, e))
        }
    })?;

    Ok(file.into_response(req))
}
