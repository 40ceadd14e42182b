//! Login endpoints.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    routing::post,
    Json, Router,
};

use gatehouse_auth::{identity, AuthError};

use crate::app::dto::{LoginForm, TokenResponse, UserOut};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::middleware::CurrentUser;
use crate::store::UserDirectory;

pub fn public_router() -> Router {
    Router::new().route("/login/access-token", post(login_for_access_token))
}

pub fn protected_router() -> Router {
    Router::new().route("/login/test-token", post(test_token))
}

/// POST /api/v1/login/access-token
///
/// OAuth2-style password login. Any credential failure, wrong password or
/// unknown email alike, yields the same generic 401 so error text cannot be
/// used to enumerate accounts.
pub async fn login_for_access_token(
    Extension(services): Extension<Arc<AppServices>>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = services.users.by_email(&form.username);

    // Verification is CPU-bound; keep it off the async workers.
    let verified = {
        let hasher = services.hasher.clone();
        let digest = user.as_ref().map(|u| u.password_hash.clone());
        let password = form.password;
        tokio::task::spawn_blocking(move || match digest {
            Some(digest) => hasher.verify(&password, &digest),
            None => false,
        })
        .await
        .map_err(|_| ApiError::Internal)?
    };

    let Some(user) = user else {
        tracing::debug!(email = %form.username, "login for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    if !verified {
        tracing::debug!(user_id = user.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let active = identity::require_active(user)?;

    let token = services
        .tokens
        .issue_default(&active.user().email)
        .map_err(|err| {
            tracing::error!(%err, "token issuance failed");
            ApiError::Internal
        })?;

    tracing::info!(user_id = active.user().id, "login succeeded");
    Ok(Json(TokenResponse::bearer(token)))
}

/// POST /api/v1/login/test-token
///
/// Returns the caller's profile if the bearer token resolves to an active
/// user. Useful as a client-side session probe.
pub async fn test_token(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<UserOut>, ApiError> {
    let active = identity::require_active(user)?;
    Ok(Json(active.into_user().into()))
}
