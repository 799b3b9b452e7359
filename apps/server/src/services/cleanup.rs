//! Startup cleanup of abandoned uploads.

use tracing::{info, warn};

use crate::error::AppResult;
use crate::services::storage::Storage;

/// Delete staging files left behind by uploads that never finished, such as
/// when the process stopped mid-request.
///
/// Returns the number of files removed. Must run before the server accepts
/// requests, since every file in the staging directory is treated as stale.
pub async fn clean_staging_dir(storage: &Storage) -> AppResult<usize> {
    let mut entries = tokio::fs::read_dir(storage.staging_dir()).await?;
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => removed += 1,
            Err(e) => warn!("Failed to remove stale upload {}: {}", path.display(), e),
        }
    }

    if removed > 0 {
        info!("Removed {} abandoned uploads from staging", removed);
    }

    Ok(removed)
}
