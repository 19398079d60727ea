//! Bearer-token authentication extractor.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use mindblog_core::ports::{AuthError, TokenClaims};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated admin identity.
///
/// Taking it as a handler argument makes the route admin-only: the handler
/// never runs unless a valid bearer token was presented.
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.email)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub expires_at: i64,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            email: claims.subject,
            expires_at: claims.expires_at,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingAuth)?;

    if token.is_empty() {
        return Err(AuthError::MissingAuth);
    }
    Ok(token)
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AppError> {
    if let Some(identity) = req.extensions().get::<Identity>() {
        return Ok(identity.clone());
    }

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        AppError::Internal("AppState not found in app data".to_string())
    })?;

    let token = bearer_token(req)?;
    let identity = match state.tokens.validate_token(token) {
        Ok(claims) => Identity::from(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            return Err(e.into());
        }
    };

    tracing::debug!(expires_at = identity.expires_at, "Admin request authenticated");
    req.extensions_mut().insert(identity.clone());
    Ok(identity)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
