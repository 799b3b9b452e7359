//! Multipart upload intake.
//!
//! Upload forms carry one file field plus optional text fields. The file part
//! is streamed chunk by chunk into a staging file so its contents are never
//! held in memory, then committed into its category directory under a
//! sanitized name.

use actix_multipart::{Field, Multipart, MultipartError};
use futures_util::StreamExt;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Category, StoredFile};
use crate::services::sanitize::sanitize_filename;
use crate::services::storage::Storage;

/// Maximum size of a single text field in bytes.
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// Maximum number of text fields per request.
const MAX_TEXT_FIELDS: usize = 32;

/// A file part streamed to the staging directory.
#[derive(Debug)]
pub struct StagedFile {
    /// Filename from the content disposition (untrusted)
    pub original_name: String,
    /// Staging file path on disk
    pub path: PathBuf,
    /// File size in bytes
    pub size: usize,
}

/// Parsed upload form.
#[derive(Debug, Default)]
pub struct UploadForm {
    /// The requested file field, when the client selected a file
    pub file: Option<StagedFile>,
    /// Text fields by name
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Non-empty text field value.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Remove any staged file belonging to this form.
    pub async fn discard(self, storage: &Storage) {
        if let Some(file) = self.file {
            storage.discard(&file.path).await;
        }
    }
}

/// Read an upload form, staging the part named `file_field`.
///
/// A file part with an empty filename counts as absent, as browsers send one
/// for an untouched file input. Other file parts are drained and ignored.
/// A body that is not multipart at all reads as an empty form.
/// Nothing is left in the staging directory when this returns an error.
pub async fn receive_form(
    payload: &mut Multipart,
    storage: &Storage,
    file_field: &str,
    max_upload_size: usize,
) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    if let Err(e) = read_parts(payload, storage, file_field, max_upload_size, &mut form).await {
        form.discard(storage).await;
        return Err(e);
    }

    Ok(form)
}

async fn read_parts(
    payload: &mut Multipart,
    storage: &Storage,
    file_field: &str,
    max_upload_size: usize,
    form: &mut UploadForm,
) -> AppResult<()> {
    let mut parts = 0usize;
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(field) => field,
            Err(e) if parts == 0 && is_not_multipart(&e) => {
                debug!("Form body is not multipart: {}", e);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        parts += 1;

        let disposition = field.content_disposition().map(|cd| {
            (
                cd.get_name().unwrap_or_default().to_string(),
                cd.get_filename().map(str::to_string),
            )
        });

        let Some((name, filename)) = disposition else {
            drain_field(&mut field).await;
            continue;
        };

        match filename {
            Some(filename) => {
                if name != file_field || filename.is_empty() || form.file.is_some() {
                    drain_field(&mut field).await;
                    continue;
                }

                let path = storage.staging_path();
                let size = match stream_to_file(&mut field, &path, max_upload_size).await {
                    Ok(size) => size,
                    Err(e) => {
                        storage.discard(&path).await;
                        return Err(e);
                    }
                };

                form.file = Some(StagedFile {
                    original_name: filename,
                    path,
                    size,
                });
            }
            None => {
                if form.fields.len() >= MAX_TEXT_FIELDS && !form.fields.contains_key(&name) {
                    return Err(AppError::InvalidInput(format!(
                        "Too many form fields. Maximum is {}",
                        MAX_TEXT_FIELDS
                    )));
                }
                let value = read_text_field(&mut field, &name).await?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(())
}

/// Errors raised before the first part when the request is not a multipart form.
fn is_not_multipart(err: &MultipartError) -> bool {
    matches!(
        err,
        MultipartError::ContentTypeMissing
            | MultipartError::ContentTypeParse
            | MultipartError::ContentTypeIncompatible
            | MultipartError::BoundaryMissing
    )
}

/// Stream a field to `path`, failing once it grows past `max_size` bytes.
async fn stream_to_file(
    field: &mut Field,
    path: &std::path::Path,
    max_size: usize,
) -> AppResult<usize> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| AppError::FileSystem(format!("Failed to create staging file: {}", e)))?;

    let mut size: usize = 0;
    while let Some(chunk) = field.next().await {
        let chunk_data = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
        size += chunk_data.len();

        if size > max_size {
            warn!("Upload rejected: exceeds {} byte limit", max_size);
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds upload limit of {} bytes",
                max_size
            )));
        }

        file.write_all(&chunk_data)
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to write staging file: {}", e)))?;
    }

    file.flush()
        .await
        .map_err(|e| AppError::FileSystem(format!("Failed to flush staging file: {}", e)))?;

    Ok(size)
}

/// Collect a small text field as UTF-8.
async fn read_text_field(field: &mut Field, name: &str) -> AppResult<String> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk_data = chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
        if buf.len() + chunk_data.len() > MAX_TEXT_FIELD_SIZE {
            return Err(AppError::InvalidInput(format!(
                "Field '{}' exceeds {} bytes",
                name, MAX_TEXT_FIELD_SIZE
            )));
        }
        buf.extend_from_slice(&chunk_data);
    }

    String::from_utf8(buf)
        .map_err(|_| AppError::InvalidInput(format!("Field '{}' is not valid UTF-8", name)))
}

/// Drain a multipart field without saving.
async fn drain_field(field: &mut Field) {
    while let Some(chunk) = field.next().await {
        let _ = chunk;
    }
}

/// Commit a staged file into `category` under its sanitized name.
///
/// Returns `None`, after removing the staging file, when the client filename
/// has nothing usable left once sanitized.
pub async fn store_upload(
    storage: &Storage,
    staged: StagedFile,
    category: Category,
) -> AppResult<Option<StoredFile>> {
    let Some(filename) = sanitize_filename(&staged.original_name) else {
        warn!(
            "Upload to {} rejected: unusable filename {:?}",
            category, staged.original_name
        );
        storage.discard(&staged.path).await;
        return Ok(None);
    };

    let path = match storage.commit(&staged.path, category, &filename).await {
        Ok(path) => path,
        Err(e) => {
            storage.discard(&staged.path).await;
            return Err(e);
        }
    };

    info!(
        "Saved {} to {} ({} bytes)",
        filename, category, staged.size
    );

    Ok(Some(StoredFile {
        original_name: staged.original_name,
        filename,
        category,
        path,
        size: staged.size as u64,
    }))
}
