//! Request/response DTOs and JSON mapping.

use serde::{Deserialize, Serialize};

use gatehouse_auth::{Role, User};

/// Login form: OAuth2 password-flow shape, `username` carries the email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

fn default_active() -> bool {
    true
}

fn default_role() -> Role {
    Role::Editor
}

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub name: Option<String>,
    pub password: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default = "default_role")]
    pub role: Role,
}

/// Partial update: absent fields are left untouched. A present `role` counts
/// as touching the role field even when the value equals the current role.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<Role>,
}

/// Public projection of a user row; never carries the password digest.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserOut {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub role: Role,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserOut>,
    pub total: usize,
}

fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
