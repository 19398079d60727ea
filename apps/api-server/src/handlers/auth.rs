//! Authentication handlers.

use actix_web::{HttpResponse, web};

use mindblog_core::domain::mask_email;
use mindblog_core::ports::AuthError;
use mindblog_shared::dto::{LoginRequest, LoginResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Validate input
    if !req.email.contains('@') || req.password.is_empty() {
        return Err(AppError::BadRequest("invalid request".to_string()));
    }

    // Verify credentials
    let verified =
        state
            .credentials
            .authenticate(&req.email, &req.password, state.passwords.as_ref());
    if let Err(e) = verified {
        if matches!(e, AuthError::InvalidCredentials) {
            tracing::warn!(email = %mask_email(&req.email), "Login rejected");
        }
        return Err(e.into());
    }

    // Generate token
    let token = state.tokens.generate_token(state.credentials.email())?;
    tracing::info!(email = %mask_email(&req.email), "Admin logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        expires_in: u64::try_from(state.tokens.expiration_seconds()).unwrap_or_default(),
    }))
}
