//! User persistence collaborator.
//!
//! The auth core only ever consumes the lookup capability ([`UserDirectory`]);
//! the commit side (insert/update/delete) is exercised by the route handlers.
//! Lookups are fresh reads per request: a user's active/role status can change
//! between requests and must be re-read each time, so nothing here caches.

use std::sync::RwLock;

use thiserror::Error;

use gatehouse_auth::{Role, User};

/// Read-side lookup capability consumed by identity resolution.
pub trait UserDirectory: Send + Sync {
    fn by_email(&self, email: &str) -> Option<User>;
    fn by_id(&self, id: i64) -> Option<User>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("a user with this email already exists")]
    DuplicateEmail,

    #[error("user not found")]
    NotFound,
}

/// Fields for a new user row. The password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
}

/// Partial update applied to an existing row. `None` leaves a field as-is.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<Role>,
}

/// In-memory reference store. Sequential ids, unique case-sensitive emails.
pub struct InMemoryUsers {
    inner: RwLock<Inner>,
}

struct Inner {
    users: Vec<User>,
    next_id: i64,
}

impl Default for InMemoryUsers {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().expect("user store lock poisoned");

        if inner.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: inner.next_id,
            email: new.email,
            name: new.name,
            password_hash: new.password_hash,
            is_active: new.is_active,
            role: new.role,
        };
        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }

    pub fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError> {
        let mut inner = self.inner.write().expect("user store lock poisoned");

        if let Some(email) = &patch.email {
            if inner.users.iter().any(|u| u.email == *email && u.id != id) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = Some(name);
        }
        if let Some(password_hash) = patch.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }

        Ok(user.clone())
    }

    pub fn delete(&self, id: i64) -> Result<User, StoreError> {
        let mut inner = self.inner.write().expect("user store lock poisoned");
        let pos = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        Ok(inner.users.remove(pos))
    }

    pub fn list(&self, skip: usize, limit: usize) -> Vec<User> {
        let inner = self.inner.read().expect("user store lock poisoned");
        inner.users.iter().skip(skip).take(limit).cloned().collect()
    }

    pub fn count(&self) -> usize {
        let inner = self.inner.read().expect("user store lock poisoned");
        inner.users.len()
    }
}

impl UserDirectory for InMemoryUsers {
    fn by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().expect("user store lock poisoned");
        inner.users.iter().find(|u| u.email == email).cloned()
    }

    fn by_id(&self, id: i64) -> Option<User> {
        let inner = self.inner.read().expect("user store lock poisoned");
        inner.users.iter().find(|u| u.id == id).cloned()
    }
}
