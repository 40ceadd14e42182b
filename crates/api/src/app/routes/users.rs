//! User resource endpoints.
//!
//! Registration is public by design (self-registration); everything else sits
//! behind the bearer middleware and then applies the active/admin gates and
//! the permission policy.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use gatehouse_auth::{identity, policy, AuthError, PasswordHasher, UpdateRequest};

use crate::app::dto::{ListQuery, UserCreate, UserList, UserOut, UserUpdate};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::middleware::CurrentUser;
use crate::store::{NewUser, UserDirectory, UserPatch};

pub fn public_router() -> Router {
    Router::new().route("/users", post(create_user))
}

pub fn protected_router() -> Router {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(read_me))
        .route(
            "/users/:id",
            get(read_user).put(update_user).delete(delete_user),
        )
}

async fn hash_password(
    hasher: &PasswordHasher,
    password: String,
) -> Result<String, ApiError> {
    let hasher = hasher.clone();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|_| ApiError::Internal)?
        .map_err(ApiError::from)
}

/// POST /api/v1/users — self-registration, unauthenticated.
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserOut>), ApiError> {
    if let policy::Decision::Deny(reason) = policy::decide_create() {
        return Err(reason.into());
    }

    let password_hash = hash_password(&services.hasher, body.password).await?;

    let user = services.users.insert(NewUser {
        email: body.email,
        name: body.name,
        password_hash,
        is_active: body.is_active,
        role: body.role,
    })?;

    tracing::info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users — admin only.
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserList>, ApiError> {
    let admin = identity::require_admin(identity::require_active(actor)?)?;

    if let policy::Decision::Deny(reason) = policy::decide_list(admin.user()) {
        return Err(reason.into());
    }

    let users = services
        .users
        .list(query.skip, query.limit)
        .into_iter()
        .map(UserOut::from)
        .collect();

    Ok(Json(UserList {
        users,
        total: services.users.count(),
    }))
}

/// GET /api/v1/users/me — any active user, own profile only.
pub async fn read_me(
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
) -> Result<Json<UserOut>, ApiError> {
    let active = identity::require_active(actor)?;
    Ok(Json(active.into_user().into()))
}

/// GET /api/v1/users/:id — admin only; 404 for a missing target.
pub async fn read_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<UserOut>, ApiError> {
    identity::require_admin(identity::require_active(actor)?)?;

    let user = services.users.by_id(id).ok_or(AuthError::NotFound)?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/:id
///
/// Reachable by any active user; the permission policy decides whether this
/// actor may mutate this target with this particular change.
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<UserUpdate>,
) -> Result<Json<UserOut>, ApiError> {
    let actor = identity::require_active(actor)?;

    let target = services.users.by_id(id).ok_or(AuthError::NotFound)?;

    let request = UpdateRequest::touching_role(body.role);
    if let policy::Decision::Deny(reason) =
        policy::decide_update(actor.user(), &target, request)
    {
        return Err(reason.into());
    }

    // An empty password field means "unchanged", matching the create-side
    // rejection of empty secrets.
    let password_hash = match body.password.filter(|p| !p.is_empty()) {
        Some(password) => Some(hash_password(&services.hasher, password).await?),
        None => None,
    };

    let updated = services.users.update(
        id,
        UserPatch {
            email: body.email,
            name: body.name,
            password_hash,
            is_active: body.is_active,
            role: body.role,
        },
    )?;

    tracing::info!(user_id = updated.id, actor_id = actor.user().id, "user updated");
    Ok(Json(updated.into()))
}

/// DELETE /api/v1/users/:id — admin only; returns the deleted record.
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<UserOut>, ApiError> {
    let admin = identity::require_admin(identity::require_active(actor)?)?;

    if let policy::Decision::Deny(reason) = policy::decide_delete(admin.user()) {
        return Err(reason.into());
    }

    let deleted = services.users.delete(id)?;
    tracing::info!(user_id = deleted.id, actor_id = admin.user().id, "user deleted");
    Ok(Json(deleted.into()))
}
