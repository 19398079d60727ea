//! Error handling - every failure renders as `{"error": "<message>"}`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use mindblog_core::error::{DomainError, RepoError};
use mindblog_core::ports::AuthError;
use mindblog_shared::ErrorResponse;
use std::fmt;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests,
    Internal(String),
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Unauthorized("unauthorized".to_string())
    }

    pub fn invalid_token() -> Self {
        AppError::Unauthorized("invalid token".to_string())
    }

    pub fn post_not_found() -> Self {
        AppError::NotFound("post not found".to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::TooManyRequests => write!(f, "Too many requests"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => ErrorResponse::new(msg.clone()),
            AppError::TooManyRequests => ErrorResponse::too_many_requests(),
            AppError::Internal(detail) => {
                // Log internal errors; the client gets a generic message
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } => {
                tracing::debug!(entity_type, %key, "Lookup missed");
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::post_not_found(),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                AppError::Internal(format!("Database connection error: {}", msg))
            }
            RepoError::Query(msg) => AppError::Internal(format!("Database query error: {}", msg)),
            RepoError::Timeout(after) => {
                AppError::Internal(format!("Database call timed out after {:?}", after))
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("invalid credentials".to_string())
            }
            AuthError::MissingAuth => AppError::unauthorized(),
            AuthError::TokenExpired | AuthError::InvalidToken(_) => AppError::invalid_token(),
            AuthError::Signing(msg) | AuthError::HashingError(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.error_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn test_internal_details_stay_server_side() {
        let (status, body) =
            body_of(RepoError::Connection("10.0.0.3:27017 refused".into()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "internal server error" }));
    }

    #[actix_web::test]
    async fn test_error_taxonomy() {
        let cases: Vec<(AppError, StatusCode, &str)> = vec![
            (
                DomainError::Validation("title is required".into()).into(),
                StatusCode::BAD_REQUEST,
                "title is required",
            ),
            (
                AuthError::InvalidCredentials.into(),
                StatusCode::UNAUTHORIZED,
                "invalid credentials",
            ),
            (AuthError::TokenExpired.into(), StatusCode::UNAUTHORIZED, "invalid token"),
            (RepoError::NotFound.into(), StatusCode::NOT_FOUND, "post not found"),
            (
                RepoError::Constraint("slug already exists".into()).into(),
                StatusCode::CONFLICT,
                "slug already exists",
            ),
            (
                AppError::TooManyRequests,
                StatusCode::TOO_MANY_REQUESTS,
                "rate limit exceeded",
            ),
        ];

        for (err, expected_status, expected_message) in cases {
            let (status, body) = body_of(err).await;
            assert_eq!(status, expected_status);
            assert_eq!(body["error"], expected_message);
        }
    }
}
