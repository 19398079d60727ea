//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct DatabaseHealth {
    pub backend: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub database: DatabaseHealth,
}

/// Health check endpoint - returns server and store status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, database) = match state.posts.ping().await {
        Ok(()) => ("ok", "up"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store ping failed");
            ("degraded", "down")
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database: DatabaseHealth {
            backend: state.storage.as_str(),
            status: database,
        },
    })
}
