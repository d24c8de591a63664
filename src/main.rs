//! SR Billing Backend Server
//!
//! Serves the billing record endpoints used by the billing web client:
//! dropdown values, submit, fetch, update and delete.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use srbilling_api::{configure_billing_po, configure_lookups};
use srbilling_core::traits::{BillingPoRepository, LookupRepository};
use srbilling_core::AppConfig;
use srbilling_db::{create_pool_with_config, init_schema, BillingPoQuery, PgBillingPoRepository};
use std::env;
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "srbilling",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "srbilling={},srbilling_api={},srbilling_db={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting SR Billing backend v{}", env!("CARGO_PKG_VERSION"));

    let config =
        AppConfig::load().map_err(|e| startup_error("Failed to load configuration", e))?;
    let tz = config
        .billing
        .tz()
        .map_err(|e| startup_error("Invalid billing configuration", e))?;

    info!("Connecting to database...");
    let pool = create_pool_with_config(&config.database)
        .await
        .map_err(|e| startup_error("Failed to create database pool", e))?;

    init_schema(&pool)
        .await
        .map_err(|e| startup_error("Failed to create tables", e))?;

    let repo = Arc::new(PgBillingPoRepository::new(BillingPoQuery::new(pool, tz)));
    let billing_repo: Arc<dyn BillingPoRepository> = repo.clone();
    let lookup_repo: Arc<dyn LookupRepository> = repo;

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    let cors_origins = config.cors.origins();
    info!(
        "Starting HTTP server on {} with {} workers (time zone {})",
        bind_addr, workers, tz
    );

    HttpServer::new(move || {
        let origins = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| origins.iter().any(|allowed| allowed == o))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(web::Data::from(billing_repo.clone()))
            .app_data(web::Data::from(lookup_repo.clone()))
            // Middleware
            .wrap(cors)
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::NormalizePath::trim())
            .route("/health", web::get().to(health_check))
            .configure(configure_billing_po)
            .configure(configure_lookups)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
