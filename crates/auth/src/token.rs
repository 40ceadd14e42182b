//! Bearer token issuance and validation (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token.
///
/// Only `sub` and `exp` are trusted; anything else a token might carry is
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email.
    pub sub: String,
    /// Expiry as epoch seconds.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, malformed token, or missing subject.
    #[error("invalid token")]
    Invalid,

    /// Well-formed and correctly signed, but past its expiry.
    #[error("token has expired")]
    Expired,

    #[error("token ttl must be positive")]
    NonPositiveTtl,
}

/// Issues and validates signed, time-bounded bearer tokens.
///
/// The signing secret and the default TTL are process-wide configuration,
/// injected once at construction and immutable afterwards. The algorithm is
/// fixed at HS256.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], default_ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            default_ttl: Duration::minutes(default_ttl_minutes),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        if ttl <= Duration::zero() {
            return Err(TokenError::NonPositiveTtl);
        }
        if subject.is_empty() {
            return Err(TokenError::Invalid);
        }

        let claims = Claims {
            sub: subject.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Issue a token with the configured default TTL.
    pub fn issue_default(&self, subject: &str) -> Result<String, TokenError> {
        self.issue(subject, self.default_ttl)
    }

    /// Validate a token: signature integrity first, then expiry, then a
    /// non-empty subject. Pure in (token, current time, secret).
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret", 30)
    }

    #[test]
    fn issue_then_validate_yields_same_subject() {
        let svc = service();
        let token = svc.issue("alice@example.com", Duration::minutes(5)).unwrap();
        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let svc = service();
        assert_eq!(
            svc.issue("alice@example.com", Duration::zero()),
            Err(TokenError::NonPositiveTtl)
        );
        assert_eq!(
            svc.issue("alice@example.com", Duration::minutes(-1)),
            Err(TokenError::NonPositiveTtl)
        );
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let svc = service();

        // Mint a token whose exp is already past; issue() refuses to, so
        // encode one directly with the same secret.
        let claims = Claims {
            sub: "alice@example.com".to_string(),
            exp: (Utc::now() - Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(svc.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_signature_is_invalid_not_expired() {
        let svc = service();
        let token = svc.issue("alice@example.com", Duration::minutes(5)).unwrap();

        // Flip one byte in the signature segment.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        assert_eq!(parts.len(), 3);
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        parts[2] = format!("{}{}", flipped, &sig[1..]);

        assert_eq!(svc.validate(&parts.join(".")), Err(TokenError::Invalid));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let svc = service();
        let other = TokenService::new(b"different-secret", 30);
        let token = other.issue("alice@example.com", Duration::minutes(5)).unwrap();
        assert_eq!(svc.validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn empty_subject_is_invalid() {
        let svc = service();
        assert_eq!(
            svc.issue("", Duration::minutes(5)),
            Err(TokenError::Invalid)
        );

        // A signed token whose sub claim is empty must also be rejected.
        let claims = Claims {
            sub: String::new(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert_eq!(svc.validate(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let svc = service();
        assert_eq!(svc.validate("not-a-jwt"), Err(TokenError::Invalid));
        assert_eq!(svc.validate(""), Err(TokenError::Invalid));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 32,
                ..ProptestConfig::default()
            })]

            #[test]
            fn round_trip_preserves_subject(subject in "[a-z]{1,12}@[a-z]{1,8}\\.com") {
                let svc = service();
                let token = svc.issue(&subject, Duration::minutes(5)).unwrap();
                let claims = svc.validate(&token).unwrap();
                prop_assert_eq!(claims.sub, subject);
            }
        }
    }
}
