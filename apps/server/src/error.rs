//! Domain error types for the portal server.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Missing form input is not an error here: handlers answer it with a plain-text response.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input data (malformed multipart, bad field encoding)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uploaded file exceeds the configured size limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// File system operation failed
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Template rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// Certificate document could not be built
    #[error("Certificate error: {0}")]
    Certificate(String),
}

impl AppError {
    /// Machine-readable error code.
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::FileSystem(_) => "FILESYSTEM_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Certificate(_) => "CERTIFICATE_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::FileSystem(_) | AppError::Template(_) | AppError::Certificate(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let response_message = match self {
            AppError::NotFound(_) | AppError::InvalidInput(_) | AppError::PayloadTooLarge(_) => {
                self.to_string()
            }
            AppError::FileSystem(err_str) => {
                tracing::error!("File system error: {}", err_str);
                "An internal storage error occurred".to_string()
            }
            AppError::Template(err_str) => {
                tracing::error!("Template error: {}", err_str);
                "The page could not be rendered".to_string()
            }
            AppError::Certificate(err_str) => {
                tracing::error!("Certificate error: {}", err_str);
                "The certificate could not be generated".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.code().to_string(),
            message: response_message,
        })
    }
}

/// Error response body.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

// Conversion implementations for common error types

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileSystem(err.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Template(err.to_string())
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::InvalidInput(format!("Multipart error: {}", err))
    }
}
