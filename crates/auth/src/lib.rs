//! `gatehouse-auth` — pure authentication/authorization core.
//!
//! This crate is intentionally decoupled from HTTP and storage: it hashes and
//! verifies credentials, issues and validates bearer tokens, and makes
//! role-based permission decisions. Callers supply user records and commit
//! results; nothing in here performs IO.

pub mod error;
pub mod identity;
pub mod password;
pub mod policy;
pub mod roles;
pub mod token;
pub mod user;

pub use error::AuthError;
pub use identity::{ActiveUser, AdminUser, IdentityError};
pub use password::{PasswordError, PasswordHasher};
pub use policy::{
    decide_create, decide_delete, decide_list, decide_update, Decision, DenyReason, UpdateRequest,
};
pub use roles::Role;
pub use token::{Claims, TokenError, TokenService};
pub use user::User;
