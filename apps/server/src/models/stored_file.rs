//! Files persisted in a category directory.

use chrono::NaiveDate;
use std::path::PathBuf;

use super::Category;

/// An uploaded file after it was committed to its category directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Filename as sent by the client (untrusted)
    pub original_name: String,
    /// Filesystem-safe name the file is stored under
    pub filename: String,
    /// Category directory the file lives in
    pub category: Category,
    /// Full path on disk
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl StoredFile {
    /// URL serving this file, if its category is served.
    pub fn url(&self) -> Option<String> {
        self.category.serve_url(&self.filename)
    }
}

/// A generated project submission certificate.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// Submitter name as entered in the form
    pub name: String,
    /// Date printed on the certificate
    pub issued_on: NaiveDate,
    /// Derived filename in the certificate directory
    pub filename: String,
    /// Full path on disk
    pub path: PathBuf,
}

impl Certificate {
    /// Download URL for this certificate.
    pub fn url(&self) -> String {
        format!("/cert/{}", urlencoding::encode(&self.filename))
    }
}
