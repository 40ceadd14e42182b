//! User identity record.

use serde::{Deserialize, Serialize};

use crate::Role;

/// A user account as held by the persistence collaborator.
///
/// # Invariants
/// - `email` is unique and case-sensitive; it doubles as the token subject.
/// - `password_hash` is a self-describing digest; plaintext never lands here.
/// - Exactly one role per user; role transitions are explicit writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
