//! Identity gate chain.
//!
//! A request's identity is established in escalating stages: valid token →
//! known user → active user → admin user. Each gate consumes the previous
//! gate's typed output, so no check is ever repeated and a later gate cannot
//! run without the earlier ones having passed.
//!
//! The first two stages (token validation and directory lookup) live at the
//! transport boundary; their failures are collapsed there into the single
//! `Unauthenticated` signal so a caller cannot learn which stage failed. The
//! gates here refine an already-resolved [`User`].

use thiserror::Error;

use crate::User;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Token invalid/expired or the subject resolved to no user. The internal
    /// distinction is for diagnostics only and is never surfaced.
    #[error("could not validate credentials")]
    Unauthenticated,

    #[error("inactive user")]
    Inactive,

    #[error("the user doesn't have enough privileges")]
    NotAdmin,
}

/// A resolved user whose `is_active` flag has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUser(User);

impl ActiveUser {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn into_user(self) -> User {
        self.0
    }
}

/// An active user whose role has been checked to be `admin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser(ActiveUser);

impl AdminUser {
    pub fn user(&self) -> &User {
        self.0.user()
    }

    pub fn into_user(self) -> User {
        self.0.into_user()
    }
}

/// Gate three: a resolved user must be active.
pub fn require_active(user: User) -> Result<ActiveUser, IdentityError> {
    if !user.is_active {
        tracing::debug!(user_id = user.id, "identity gate: user is inactive");
        return Err(IdentityError::Inactive);
    }
    Ok(ActiveUser(user))
}

/// Gate four: an active user must hold the admin role.
pub fn require_admin(user: ActiveUser) -> Result<AdminUser, IdentityError> {
    if !user.user().is_admin() {
        tracing::debug!(user_id = user.user().id, "identity gate: user is not admin");
        return Err(IdentityError::NotAdmin);
    }
    Ok(AdminUser(user))
}
