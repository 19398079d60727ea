//! # Mindblog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

#[cfg(feature = "scheduler")]
mod background;

use config::AppConfig;
use middleware::rate_limit::RateLimitMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_telemetry(&TelemetryConfig::from_env());

    // Load configuration
    let config = AppConfig::from_env().context("Invalid configuration")?;

    tracing::info!(
        "Starting Mindblog API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::init(&config)
        .await
        .context("Failed to initialize post storage")?;

    #[cfg(feature = "scheduler")]
    let mut scheduler = background::spawn_maintenance(
        background::SchedulerConfig {
            enabled: config.scheduler_enabled,
            rate_limit_idle: config.rate_limit_idle,
        },
        state.limiter.clone(),
    )
    .await
    .context("Failed to start background scheduler")?;

    let frontend_origin = config.frontend_origin.clone();

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(RateLimitMiddleware::new(state.limiter.clone()))
            .wrap(cors(frontend_origin.as_deref()))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
    .run()
    .await
    .context("HTTP server error")?;

    #[cfg(feature = "scheduler")]
    let _ = scheduler
        .shutdown()
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Scheduler did not stop cleanly"));

    Ok(())
}

/// CORS for the single configured front-end origin; no origin, no CORS.
fn cors(frontend_origin: Option<&str>) -> Cors {
    match frontend_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
            .supports_credentials(),
        None => Cors::default(),
    }
}
