//! Health check endpoints.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;
use serde::Serialize;

use crate::models::Category;
use crate::services::Storage;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    storage: &'static str,
}

/// Health check endpoint.
///
/// Returns 200 if the service is running.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check endpoint.
///
/// Returns 200 when every category directory is present.
#[get("/ready")]
pub async fn ready(storage: web::Data<Storage>) -> HttpResponse {
    let mut missing = Vec::new();
    for category in Category::ALL {
        let present = tokio::fs::metadata(storage.dir(category))
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !present {
            missing.push(category.dir_name());
        }
    }

    if missing.is_empty() {
        HttpResponse::Ok().json(ReadyResponse {
            status: "ready",
            storage: "available",
        })
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "NOT_READY",
            "message": format!("Missing storage directories: {}", missing.join(", "))
        }))
    }
}

/// Configure health routes.
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
