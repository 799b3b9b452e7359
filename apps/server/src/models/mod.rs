//! Domain models for the age-group portal.

pub mod category;
pub mod stored_file;

// Re-export commonly used types
pub use category::{AgeGroup, Category};
pub use stored_file::{Certificate, StoredFile};
