//! Age-group learning portal - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use actix_files::Files;
use actix_web::{App, HttpServer, web};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use age_portal_lib::config::Config;
use age_portal_lib::services::{Storage, clean_staging_dir};
use age_portal_lib::{api, middleware};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Check for --health-check flag (used by Docker HEALTHCHECK)
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--health-check") {
        dotenvy::dotenv().ok();
        std::process::exit(if Config::from_env().is_ok() { 0 } else { 1 });
    }

    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(std::io::Error::other)?;

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("");
            error!("Please check your environment variables:");
            error!("  - RUST_ENV, when set, must be 'development' or 'production'");
            error!("  - In production, PORTAL_UPLOAD_ROOT must be set");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Age-Group Learning Portal");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    // Category directories must exist before the first request
    let storage = Storage::new(&config.upload_root);
    storage.ensure_dirs().await.map_err(std::io::Error::other)?;
    clean_staging_dir(&storage)
        .await
        .map_err(std::io::Error::other)?;

    let bind_address = config.bind_address();
    let max_upload_size = config.max_upload_size;
    let static_dir = config.static_dir.is_dir().then(|| config.static_dir.clone());

    info!("Upload limit: {}MB per file", max_upload_size / 1024 / 1024);

    match static_dir {
        Some(ref dir) => info!("Static file serving enabled from {:?}", dir),
        None => warn!(
            "Static directory {:?} not found, /static is disabled",
            config.static_dir
        ),
    }

    let worker_count = if config.is_development() {
        4
    } else {
        num_cpus::get()
    };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    HttpServer::new(move || {
        let mut app = App::new()
            .wrap(middleware::RequestLogger)
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(max_upload_size))
            .configure(api::configure_routes);

        if let Some(ref dir) = static_dir {
            app = app.service(Files::new("/static", dir.clone()).prefer_utf8(true));
        }

        app
    })
    .workers(worker_count)
    .bind(&bind_address)?
    .run()
    .await
}
