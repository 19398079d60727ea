//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;


use actix_web::{HttpRequest, error, web};

use crate::middleware::error::AppError;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    AppError::BadRequest("invalid request".to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected query string");
    AppError::BadRequest("invalid query parameters".to_string()).into()
}

/// Configure all application routes.
///
/// `/posts/all` and `/posts/random` are registered before `/posts/{key}`
/// so they are never read as slugs.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .route("/auth/login", web::post().to(auth::login))
                .service(
                    web::scope("/posts")
                        .service(
                            web::resource("")
                                .route(web::get().to(posts::list_published))
                                .route(web::post().to(posts::create)),
                        )
                        .route("/all", web::get().to(posts::list_all))
                        .route("/random", web::get().to(posts::random))
                        .route("/{id}/publish", web::patch().to(posts::toggle_publish))
                        .service(
                            web::resource("/{key}")
                                .route(web::get().to(posts::by_slug))
                                .route(web::put().to(posts::update))
                                .route(web::delete().to(posts::delete)),
                        ),
                ),
        );
}
