//! HTTP endpoint modules.

pub mod files;
pub mod health;
pub mod pages;
pub mod projects;
pub mod videos;

use actix_web::{HttpResponse, web};
use askama::Template;

use crate::error::AppResult;

pub use health::configure_health_routes;
pub use pages::configure_routes as configure_page_routes;
pub use projects::configure_routes as configure_project_routes;
pub use videos::configure_routes as configure_video_routes;

/// Configure every portal route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_page_routes)
        .configure(configure_video_routes)
        .configure(configure_project_routes)
        .service(web::scope("/api/v1").configure(configure_health_routes));
}

/// Render a template into an HTML response.
pub(crate) fn render<T: Template>(template: &T) -> AppResult<HttpResponse> {
    Ok(html(template.render()?))
}

/// HTML response from a literal snippet.
pub(crate) fn html(body: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body.into())
}

/// Plain-text response, used for user-facing validation failures.
pub(crate) fn plain_text(body: &'static str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}
