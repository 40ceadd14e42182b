//! Error kinds shared across the auth core.
//!
//! These are outcome kinds, not exception types: expected failures (bad
//! password, expired token, denied mutation) travel as values. Only corrupted
//! configuration is fatal, and only at startup.

use thiserror::Error;

use crate::{DenyReason, IdentityError, TokenError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Login failure. Deliberately uninformative: the caller cannot tell a
    /// wrong password from an unknown email.
    #[error("incorrect email or password")]
    InvalidCredentials,

    /// Umbrella for any token/user-lookup failure on a protected request.
    #[error("could not validate credentials")]
    Unauthenticated,

    #[error("inactive user")]
    InactiveUser,

    #[error("not enough permissions")]
    PermissionDenied,

    #[error("users cannot change their own role")]
    CannotChangeOwnRole,

    #[error("a user with this email already exists")]
    DuplicateEmail,

    #[error("user not found")]
    NotFound,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        // The expired/invalid distinction stays internal; the caller sees a
        // single generic failure.
        tracing::debug!(%err, "token validation failed");
        AuthError::Unauthenticated
    }
}

impl From<IdentityError> for AuthError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::Unauthenticated => AuthError::Unauthenticated,
            IdentityError::Inactive => AuthError::InactiveUser,
            IdentityError::NotAdmin => AuthError::PermissionDenied,
        }
    }
}

impl From<DenyReason> for AuthError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::PermissionDenied => AuthError::PermissionDenied,
            DenyReason::CannotChangeOwnRole => AuthError::CannotChangeOwnRole,
        }
    }
}
