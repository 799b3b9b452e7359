//! Shared helpers for portal integration tests.

use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::{App, test, web};
use age_portal_lib::{api, middleware};
use age_portal_lib::services::Storage;
use tempfile::TempDir;

/// Upload limit used by the test app.
pub const TEST_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

const BOUNDARY: &str = "----portal-test-boundary";

/// One part of a multipart form.
pub enum Part<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        filename: &'a str,
        content: &'a [u8],
    },
}

/// Encode parts as a multipart/form-data body.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// Create storage in a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub async fn create_test_storage() -> (TempDir, Storage) {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let storage = Storage::new(tmp.path().join("uploads"));
    storage
        .ensure_dirs()
        .await
        .expect("Failed to create storage directories");
    (tmp, storage)
}

/// Create a test portal app over `storage`.
pub async fn create_test_app(
    storage: &Storage,
    max_upload_size: usize,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(middleware::RequestLogger)
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(max_upload_size))
            .configure(api::configure_routes),
    )
    .await
}

/// POST a multipart form and return status and body text.
pub async fn post_form<S>(app: &S, uri: &str, parts: &[Part<'_>]) -> (u16, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (content_type, body) = multipart_body(parts);
    post_raw(app, uri, Some(&content_type), body).await
}

/// POST an arbitrary body and return status and body text.
pub async fn post_raw<S>(
    app: &S,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<actix_web::web::Bytes>,
) -> (u16, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let mut req = test::TestRequest::post().uri(uri);
    if let Some(content_type) = content_type {
        req = req.insert_header((header::CONTENT_TYPE, content_type.to_string()));
    }
    let req = req.set_payload(body).to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// GET a URI and return status and raw body.
pub async fn get<S>(app: &S, uri: &str) -> (u16, Vec<u8>)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, body.to_vec())
}

/// GET a URI and return status and body text.
pub async fn get_text<S>(app: &S, uri: &str) -> (u16, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let (status, body) = get(app, uri).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

/// Extract the certificate link from a project upload response.
pub fn certificate_link(body: &str) -> Option<&str> {
    let start = body.find("href='/cert/")? + "href='".len();
    let end = body[start..].find('\'')?;
    Some(&body[start..start + end])
}
