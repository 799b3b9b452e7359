//! Informational pages.

use actix_web::{HttpResponse, get, web};
use askama::Template;

use crate::api::{plain_text, render};
use crate::error::AppResult;
use crate::models::AgeGroup;

/// Response for an `/age/{group}` value that names no group.
pub const INVALID_AGE_GROUP: &str = "Invalid age group";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage;

#[derive(Template)]
#[template(path = "age_1_5.html")]
struct EarlyChildhoodPage;

#[derive(Template)]
#[template(path = "age_6_18.html")]
struct SchoolAgePage;

#[derive(Template)]
#[template(path = "age_19_25.html")]
struct YoungAdultPage;

#[derive(Template)]
#[template(path = "kit.html")]
struct KitPage;

#[derive(Template)]
#[template(path = "day_to_day.html")]
struct ProblemsPage;

/// Landing page.
#[get("/")]
pub async fn home() -> AppResult<HttpResponse> {
    render(&IndexPage)
}

/// Page for one age group.
#[get("/age/{group}")]
pub async fn age_page(path: web::Path<String>) -> AppResult<HttpResponse> {
    match AgeGroup::parse(&path) {
        Some(AgeGroup::EarlyChildhood) => render(&EarlyChildhoodPage),
        Some(AgeGroup::SchoolAge) => render(&SchoolAgePage),
        Some(AgeGroup::YoungAdult) => render(&YoungAdultPage),
        None => Ok(plain_text(INVALID_AGE_GROUP)),
    }
}

/// Learning kit page.
#[get("/kit")]
pub async fn kit_page() -> AppResult<HttpResponse> {
    render(&KitPage)
}

/// Day-to-day problem statements page.
#[get("/problems")]
pub async fn problems_page() -> AppResult<HttpResponse> {
    render(&ProblemsPage)
}

/// Configure page routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home)
        .service(age_page)
        .service(kit_page)
        .service(problems_page);
}
