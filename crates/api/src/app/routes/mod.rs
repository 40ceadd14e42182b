//! HTTP routes and handlers, one file per area.

use axum::Router;

pub mod login;
pub mod system;
pub mod users;

/// Routes reachable without a bearer token.
pub fn public_router() -> Router {
    Router::new()
        .merge(login::public_router())
        .merge(users::public_router())
}

/// Routes behind the bearer middleware.
pub fn protected_router() -> Router {
    Router::new()
        .merge(login::protected_router())
        .merge(users::protected_router())
}
