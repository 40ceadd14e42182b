//! Role-based permission decisions.
//!
//! Pure policy: no IO, no panics, no business logic beyond the role matrix.
//! Callers translate a deny into the appropriate boundary error.

use crate::{Role, User};

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Specific denial reason. Authorization failures carry a reason because the
/// actor is already authenticated; there is no enumeration risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    PermissionDenied,
    CannotChangeOwnRole,
}

/// The shape of a requested user update, as far as policy cares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateRequest {
    /// Whether the request includes a role value at all. Touching the field
    /// is what is restricted, even if the value equals the current role.
    pub touches_role: bool,
}

impl UpdateRequest {
    pub fn touching_role(role: Option<Role>) -> Self {
        Self {
            touches_role: role.is_some(),
        }
    }
}

/// May `actor` update `target` with the given request?
///
/// - Admins may update anyone, including their own role.
/// - Non-admins may update only themselves, and never the role field.
pub fn decide_update(actor: &User, target: &User, request: UpdateRequest) -> Decision {
    if actor.is_admin() {
        return Decision::Allow;
    }

    if actor.id != target.id {
        return Decision::Deny(DenyReason::PermissionDenied);
    }

    if request.touches_role {
        return Decision::Deny(DenyReason::CannotChangeOwnRole);
    }

    Decision::Allow
}

/// May a new user account be created?
///
/// Always: registration is unauthenticated self-service, constrained only by
/// email uniqueness, which the persistence collaborator enforces. Kept as a
/// policy decision so every mutation consults the same module.
pub fn decide_create() -> Decision {
    Decision::Allow
}

/// May `actor` delete user accounts?
pub fn decide_delete(actor: &User) -> Decision {
    if actor.is_admin() {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::PermissionDenied)
    }
}

/// May `actor` list or read other users' accounts?
pub fn decide_list(actor: &User) -> Decision {
    if actor.is_admin() {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: Role) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            name: None,
            password_hash: "$argon2id$stub".to_string(),
            is_active: true,
            role,
        }
    }

    #[test]
    fn update_matrix_is_exhaustive() {
        let admin = user(1, Role::Admin);
        let editor = user(2, Role::Editor);
        let other = user(3, Role::Editor);

        let plain = UpdateRequest { touches_role: false };
        let with_role = UpdateRequest { touches_role: true };

        // (editor, self, name) -> Allow
        assert_eq!(decide_update(&editor, &editor, plain), Decision::Allow);
        // (editor, self, role) -> Deny(CannotChangeOwnRole)
        assert_eq!(
            decide_update(&editor, &editor, with_role),
            Decision::Deny(DenyReason::CannotChangeOwnRole)
        );
        // (editor, other, name) -> Deny(PermissionDenied)
        assert_eq!(
            decide_update(&editor, &other, plain),
            Decision::Deny(DenyReason::PermissionDenied)
        );
        // (editor, other, role) -> Deny(PermissionDenied)
        assert_eq!(
            decide_update(&editor, &other, with_role),
            Decision::Deny(DenyReason::PermissionDenied)
        );
        // (admin, other, name) -> Allow
        assert_eq!(decide_update(&admin, &other, plain), Decision::Allow);
        // (admin, other, role) -> Allow
        assert_eq!(decide_update(&admin, &other, with_role), Decision::Allow);
        // (admin, self, name) -> Allow
        assert_eq!(decide_update(&admin, &admin, plain), Decision::Allow);
        // (admin, self, role) -> Allow
        assert_eq!(decide_update(&admin, &admin, with_role), Decision::Allow);
    }

    #[test]
    fn touching_role_with_current_value_is_still_denied_for_non_admin() {
        let editor = user(2, Role::Editor);
        // Same value as the current role: intent to touch the field is what
        // is restricted.
        let request = UpdateRequest::touching_role(Some(Role::Editor));
        assert_eq!(
            decide_update(&editor, &editor, request),
            Decision::Deny(DenyReason::CannotChangeOwnRole)
        );
    }

    #[test]
    fn creation_is_open_to_anyone() {
        assert_eq!(decide_create(), Decision::Allow);
    }

    #[test]
    fn only_admin_may_delete() {
        assert_eq!(decide_delete(&user(1, Role::Admin)), Decision::Allow);
        assert_eq!(
            decide_delete(&user(2, Role::Editor)),
            Decision::Deny(DenyReason::PermissionDenied)
        );
    }

    #[test]
    fn only_admin_may_list_others() {
        assert_eq!(decide_list(&user(1, Role::Admin)), Decision::Allow);
        assert_eq!(
            decide_list(&user(2, Role::Editor)),
            Decision::Deny(DenyReason::PermissionDenied)
        );
    }
}
