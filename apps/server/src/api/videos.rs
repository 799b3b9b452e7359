//! Video upload, listing and serving for the 1-5 and 6-18 age groups.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, get, web};
use askama::Template;
use tracing::warn;

use crate::api::files::serve_stored;
use crate::api::{html, plain_text, render};
use crate::error::{AppError, AppResult};
use crate::models::{AgeGroup, Category};
use crate::services::{Storage, receive_form, store_upload};

/// Multipart field carrying the video file.
pub const VIDEO_FIELD: &str = "video";

/// Response when the form carries no usable video.
pub const VIDEO_MISSING: &str = "Video missing";

/// A listed video and the URL serving it.
pub struct VideoEntry {
    pub name: String,
    pub url: String,
}

#[derive(Template)]
#[template(path = "upload_video.html")]
struct UploadVideoPage {
    label: &'static str,
    action: String,
    back: String,
}

#[derive(Template)]
#[template(path = "animated_videos.html")]
struct AnimatedVideosPage {
    videos: Vec<VideoEntry>,
}

#[derive(Template)]
#[template(path = "list_video_6_18.html")]
struct SchoolAgeVideosPage {
    videos: Vec<VideoEntry>,
}

/// Video category for an age group that has one.
fn video_category(group: AgeGroup) -> AppResult<Category> {
    group
        .video_category()
        .ok_or_else(|| AppError::NotFound(format!("Videos for ages {}", group.label())))
}

/// Upload form for an age group.
fn upload_form(group: AgeGroup) -> AppResult<HttpResponse> {
    render(&UploadVideoPage {
        label: group.label(),
        action: format!("/videos/upload/{}", group.as_str()),
        back: format!("/age/{}", group.as_str()),
    })
}

/// Accept a video upload for an age group.
async fn accept_upload(
    mut payload: Multipart,
    storage: &Storage,
    max_upload_size: usize,
    group: AgeGroup,
) -> AppResult<HttpResponse> {
    let category = video_category(group)?;

    let form = receive_form(&mut payload, storage, VIDEO_FIELD, max_upload_size).await?;
    let Some(staged) = form.file else {
        warn!("Video upload for ages {} without a file", group.as_str());
        return Ok(plain_text(VIDEO_MISSING));
    };

    if store_upload(storage, staged, category).await?.is_none() {
        return Ok(plain_text(VIDEO_MISSING));
    }

    Ok(html(format!(
        "Uploaded for Age {}<br><br><a href='/age/{}'>Back</a>",
        group.label(),
        group.as_str()
    )))
}

/// Videos currently stored for a category, in directory order.
async fn video_entries(storage: &Storage, category: Category) -> AppResult<Vec<VideoEntry>> {
    let names = storage.list(category).await?;
    Ok(names
        .into_iter()
        .map(|name| VideoEntry {
            url: category.serve_url(&name).unwrap_or_default(),
            name,
        })
        .collect())
}

async fn upload_form_1_5() -> AppResult<HttpResponse> {
    upload_form(AgeGroup::EarlyChildhood)
}

async fn upload_video_1_5(
    payload: Multipart,
    storage: web::Data<Storage>,
    max_upload_size: web::Data<usize>,
) -> AppResult<HttpResponse> {
    accept_upload(
        payload,
        &storage,
        *max_upload_size.get_ref(),
        AgeGroup::EarlyChildhood,
    )
    .await
}

async fn upload_form_6_18() -> AppResult<HttpResponse> {
    upload_form(AgeGroup::SchoolAge)
}

async fn upload_video_6_18(
    payload: Multipart,
    storage: web::Data<Storage>,
    max_upload_size: web::Data<usize>,
) -> AppResult<HttpResponse> {
    accept_upload(
        payload,
        &storage,
        *max_upload_size.get_ref(),
        AgeGroup::SchoolAge,
    )
    .await
}

/// Serve a stored 1-5 video.
#[get("/videos/1-5/{filename}")]
pub async fn serve_video_1_5(
    req: HttpRequest,
    path: web::Path<String>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    serve_stored(&req, &storage, Category::EarlyChildhoodVideo, &path).await
}

/// Serve a stored 6-18 video.
#[get("/videos/6-18/{filename}")]
pub async fn serve_video_6_18(
    req: HttpRequest,
    path: web::Path<String>,
    storage: web::Data<Storage>,
) -> AppResult<HttpResponse> {
    serve_stored(&req, &storage, Category::SchoolAgeVideo, &path).await
}

/// Animated videos page listing every 1-5 upload.
#[get("/animated-videos")]
pub async fn animated_videos(storage: web::Data<Storage>) -> AppResult<HttpResponse> {
    let videos = video_entries(&storage, Category::EarlyChildhoodVideo).await?;
    render(&AnimatedVideosPage { videos })
}

/// Listing of every 6-18 upload.
#[get("/videos/list/6-18")]
pub async fn list_videos_6_18(storage: web::Data<Storage>) -> AppResult<HttpResponse> {
    let videos = video_entries(&storage, Category::SchoolAgeVideo).await?;
    render(&SchoolAgeVideosPage { videos })
}

/// Configure video routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/videos/upload/1-5")
            .route(web::get().to(upload_form_1_5))
            .route(web::post().to(upload_video_1_5)),
    )
    .service(
        web::resource("/videos/upload/6-18")
            .route(web::get().to(upload_form_6_18))
            .route(web::post().to(upload_video_6_18)),
    )
    .service(serve_video_1_5)
    .service(serve_video_6_18)
    .service(animated_videos)
    .service(list_videos_6_18);
}
