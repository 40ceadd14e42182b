//! Bearer authentication middleware: the first two identity stages.
//!
//! Extracts the bearer token, validates it, and resolves the subject through
//! the user directory. Token failures and lookup misses are deliberately
//! indistinguishable on the wire (single generic 401); the distinction is
//! logged for diagnostics only. Later gates (active, admin) run in handlers
//! on the resolved user.

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use gatehouse_auth::{AuthError, TokenService, User};

use crate::app::errors::ApiError;
use crate::store::UserDirectory;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
    pub directory: Arc<dyn UserDirectory>,
}

/// The authenticated user attached to a request. Lifetime: one request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    // Stage one: token integrity and expiry.
    let claims = state.tokens.validate(token).map_err(AuthError::from)?;

    // Stage two: the subject must resolve to a known user. Fresh read per
    // request; activation and role changes take effect immediately.
    let user = state.directory.by_email(&claims.sub).ok_or_else(|| {
        tracing::debug!(subject = %claims.sub, "token subject resolved to no user");
        AuthError::Unauthenticated
    })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Absent or malformed Authorization headers are treated identically to an
/// invalid token.
fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::Unauthenticated)?;

    let header = header.to_str().map_err(|_| AuthError::Unauthenticated)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::Unauthenticated)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthenticated.into());
    }

    Ok(token)
}
