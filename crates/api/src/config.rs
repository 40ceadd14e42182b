//! Process-wide configuration, loaded once at startup and immutable after.

/// Configuration for the API process.
///
/// Constructed once and passed by injection; no global state.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Symmetric signing secret for access tokens.
    pub secret_key: String,
    /// Default access-token lifetime.
    pub access_token_ttl_minutes: i64,
    /// Seed admin account, created at startup if the directory is empty.
    pub first_admin_email: String,
    pub first_admin_password: String,
    pub first_admin_name: String,
    /// Bind address for the HTTP listener.
    pub bind_addr: String,
}

impl ApiConfig {
    /// Load configuration from the environment.
    ///
    /// A missing `SECRET_KEY` falls back to an insecure development default
    /// with a warning rather than refusing to start.
    pub fn from_env() -> Self {
        let secret_key = std::env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let access_token_ttl_minutes = std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            secret_key,
            access_token_ttl_minutes,
            first_admin_email: std::env::var("FIRST_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            first_admin_password: std::env::var("FIRST_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "change-me".to_string()),
            first_admin_name: std::env::var("FIRST_ADMIN_NAME")
                .unwrap_or_else(|_| "Administrator".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_defaults_are_sane() {
        let cfg = ApiConfig::from_env();
        assert!(cfg.access_token_ttl_minutes > 0);
        assert!(!cfg.secret_key.is_empty());
        assert!(!cfg.first_admin_email.is_empty());
    }
}
