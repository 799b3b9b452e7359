//! Project submissions and their certificates.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::Local;
use tracing::warn;

use crate::api::files::serve_stored;
use crate::api::{html, plain_text};
use crate::error::AppResult;
use crate::models::Category;
use crate::services::{Storage, generate_certificate, receive_form, store_upload};

/// Multipart field carrying the project file.
pub const PROJECT_FIELD: &str = "project";

/// Multipart field carrying the submitter name.
pub const NAME_FIELD: &str = "name";

/// Response when the name or project file is absent.
pub const PROJECT_MISSING: &str = "Name or project missing";

/// Accept a project submission and issue its certificate.
///
/// The project file is committed before the certificate is generated; a
/// certificate failure leaves the project file in place.
#[post("/project/upload")]
pub async fn upload_project(
    mut payload: Multipart,
    storage: web::Data<Storage>,
    max_upload_size: web::Data<usize>,
) -> AppResult<HttpResponse> {
    let mut form = receive_form(
        &mut payload,
        &storage,
        PROJECT_FIELD,
        *max_upload_size.get_ref(),
    )
    .await?;

    let Some(name) = form.text(NAME_FIELD).map(str::to_string) else {
        warn!("Project submission without a name");
        form.discard(&storage).await;
        return Ok(plain_text(PROJECT_MISSING));
    };

    let Some(staged) = form.file.take() else {
        warn!("Project submission from {:?} without a file", name);
        return Ok(plain_text(PROJECT_MISSING));
    };

    if store_upload(&storage, staged, Category::Project).await?.is_none() {
        return Ok(plain_text(PROJECT_MISSING));
    }

    let certificate = generate_certificate(&storage, &name, Local::now().date_naive()).await?;

    Ok(html(format!(
        "Project uploaded successfully!<br><br>\n\
         <a href='{}'><button>Download Certificate</button></a><br><br>\n\
         <a href='/age/19-25'><button>Back</button></a>\n",
        certificate.url()
    )))
}

/// Serve a generated certificate.
#[get("/cert/{filename}")]
pub async fn serve_certificate(
    req: HttpRequest,
    path: web::Path<String>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    serve_stored(&req, &storage, Category::Certificate, &path).await
}

/// Configure project routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_project).service(serve_certificate);
}
