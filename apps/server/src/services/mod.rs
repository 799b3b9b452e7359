//! Business logic services.

pub mod certificate;
pub mod cleanup;
pub mod sanitize;
pub mod storage;
pub mod upload;

pub use certificate::{certificate_filename, generate_certificate};
pub use cleanup::clean_staging_dir;
pub use storage::Storage;
pub use upload::{receive_form, store_upload, StagedFile, UploadForm};
