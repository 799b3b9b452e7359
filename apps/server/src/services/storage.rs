//! Local filesystem storage for uploaded and generated files.
//!
//! Every category owns one directory under the upload root. Uploads are first
//! streamed into a private staging directory and then renamed into place, so a
//! half-written upload never appears under its final name.

use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Category;
use crate::services::sanitize::is_plain_filename;

/// Name of the staging directory inside the upload root.
const STAGING_DIR: &str = ".upload_temp";

/// Category directory layout rooted at a single upload directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a storage layout rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the category and staging directories if they are missing.
    pub async fn ensure_dirs(&self) -> AppResult<()> {
        for category in Category::ALL {
            let dir = self.dir(category);
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                AppError::FileSystem(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        tokio::fs::create_dir_all(self.staging_dir())
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to create staging directory: {}", e)))?;

        info!("Storage initialized at {}", self.root.display());
        Ok(())
    }

    /// Upload root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding files of a category.
    pub fn dir(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Directory holding in-flight uploads.
    pub fn staging_dir(&self) -> PathBuf {
        self.root.join(STAGING_DIR)
    }

    /// Fresh, unique path for an upload being streamed in.
    pub fn staging_path(&self) -> PathBuf {
        self.staging_dir().join(format!("upload_{}", Uuid::new_v4()))
    }

    /// Resolve a requested filename inside a category directory.
    ///
    /// Names that could address anything other than a direct child of the
    /// directory are reported as not found.
    pub fn resolve(&self, category: Category, filename: &str) -> AppResult<PathBuf> {
        if !is_plain_filename(filename) {
            return Err(AppError::NotFound(format!("File {}", filename)));
        }
        Ok(self.dir(category).join(filename))
    }

    /// Move a staged upload into its category directory, replacing any file
    /// already stored under `filename`.
    pub async fn commit(
        &self,
        staged: &Path,
        category: Category,
        filename: &str,
    ) -> AppResult<PathBuf> {
        let final_path = self.resolve(category, filename)?;

        tokio::fs::rename(staged, &final_path)
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to move file: {}", e)))?;

        debug!("Committed {} to {}", filename, category);
        Ok(final_path)
    }

    /// Write a complete file into a category directory, replacing any file
    /// already stored under `filename`.
    pub async fn write(
        &self,
        category: Category,
        filename: &str,
        data: &[u8],
    ) -> AppResult<PathBuf> {
        let path = self.resolve(category, filename)?;

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to write {}: {}", filename, e)))?;

        Ok(path)
    }

    /// Names of the entries currently in a category directory.
    ///
    /// Entries come back in whatever order the filesystem yields them.
    pub async fn list(&self, category: Category) -> AppResult<Vec<String>> {
        let mut entries = tokio::fs::read_dir(self.dir(category))
            .await
            .map_err(|e| AppError::FileSystem(format!("Failed to read {}: {}", category, e)))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }

    /// Remove a staging file, ignoring files that are already gone.
    pub async fn discard(&self, staged: &Path) {
        if let Err(e) = tokio::fs::remove_file(staged).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!("Failed to remove staging file {}: {}", staged.display(), e);
        }
    }
}
