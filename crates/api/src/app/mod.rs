//! HTTP application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: auth core + user store construction and admin seeding
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::config::ApiConfig;
use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(config: &ApiConfig) -> Router {
    let services = Arc::new(services::build_services(config));

    let auth_state = AuthState {
        tokens: services.tokens.clone(),
        directory: services.users.clone(),
    };

    // Protected routes: bearer token must resolve to a known user before any
    // handler runs; handlers apply the remaining gates.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let api_v1 = routes::public_router()
        .merge(protected)
        .layer(Extension(services));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/v1", api_v1)
}
