//! Consistent JSON error responses.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use gatehouse_auth::{AuthError, DenyReason, IdentityError, PasswordError};

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Validation(String),

    #[error("internal error")]
    Internal,
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        ApiError::Auth(err.into())
    }
}

impl From<DenyReason> for ApiError {
    fn from(reason: DenyReason) -> Self {
        ApiError::Auth(reason.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Auth(AuthError::DuplicateEmail),
            StoreError::NotFound => ApiError::Auth(AuthError::NotFound),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::EmptySecret => ApiError::Validation("password must not be empty".into()),
            PasswordError::Hash(msg) => {
                tracing::error!(%msg, "password hashing failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Auth(err) => auth_error_to_response(err),
            ApiError::Validation(msg) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            ApiError::Internal => json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "internal error",
            ),
        }
    }
}

fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        // Both login and protected-request failures surface as the same
        // generic 401 with a bearer challenge.
        AuthError::InvalidCredentials | AuthError::Unauthenticated => {
            let mut response =
                json_error(StatusCode::UNAUTHORIZED, "unauthenticated", message);
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
            response
        }
        AuthError::InactiveUser => json_error(StatusCode::BAD_REQUEST, "inactive_user", message),
        AuthError::PermissionDenied => {
            json_error(StatusCode::FORBIDDEN, "permission_denied", message)
        }
        AuthError::CannotChangeOwnRole => {
            json_error(StatusCode::FORBIDDEN, "cannot_change_own_role", message)
        }
        AuthError::DuplicateEmail => {
            json_error(StatusCode::BAD_REQUEST, "duplicate_email", message)
        }
        AuthError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_carries_bearer_challenge() {
        let response = ApiError::Auth(AuthError::Unauthenticated).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn status_mapping_matches_the_contract() {
        let cases = [
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (AuthError::InactiveUser, StatusCode::BAD_REQUEST),
            (AuthError::PermissionDenied, StatusCode::FORBIDDEN),
            (AuthError::CannotChangeOwnRole, StatusCode::FORBIDDEN),
            (AuthError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (AuthError::NotFound, StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::Auth(err).into_response().status(), status);
        }
    }
}
