//! Service wiring: the auth core plus the user store, built once at startup.

use std::sync::Arc;

use gatehouse_auth::{PasswordHasher, Role, TokenService};

use crate::config::ApiConfig;
use crate::store::{InMemoryUsers, NewUser, StoreError};

pub struct AppServices {
    pub hasher: PasswordHasher,
    pub tokens: Arc<TokenService>,
    pub users: Arc<InMemoryUsers>,
}

/// Build services from immutable configuration and seed the first admin
/// account so a fresh deployment is administrable.
pub fn build_services(config: &ApiConfig) -> AppServices {
    let hasher = PasswordHasher::default();
    let tokens = Arc::new(TokenService::new(
        config.secret_key.as_bytes(),
        config.access_token_ttl_minutes,
    ));
    let users = Arc::new(InMemoryUsers::new());

    seed_first_admin(&hasher, &users, config);

    AppServices {
        hasher,
        tokens,
        users,
    }
}

fn seed_first_admin(hasher: &PasswordHasher, users: &InMemoryUsers, config: &ApiConfig) {
    // Hashing here is blocking, but this runs once before the listener binds.
    let password_hash = match hasher.hash(&config.first_admin_password) {
        Ok(hash) => hash,
        Err(err) => {
            tracing::error!(%err, "cannot hash first admin password; skipping seed");
            return;
        }
    };

    match users.insert(NewUser {
        email: config.first_admin_email.clone(),
        name: Some(config.first_admin_name.clone()),
        password_hash,
        is_active: true,
        role: Role::Admin,
    }) {
        Ok(admin) => {
            tracing::info!(email = %admin.email, "seeded first admin user");
        }
        Err(StoreError::DuplicateEmail) => {
            tracing::debug!("first admin already present");
        }
        Err(err) => {
            tracing::error!(%err, "failed to seed first admin");
        }
    }
}
