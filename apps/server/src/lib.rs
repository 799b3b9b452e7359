//! Age-group learning portal library.
//!
//! Page rendering, category storage, multipart upload intake and certificate
//! generation for the portal server.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
