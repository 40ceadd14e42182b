//! Credential hashing and verification.
//!
//! Digests are PHC strings (algorithm, cost parameters, salt and hash output
//! all embedded), so `verify` needs no configuration beyond the digest itself.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("password must not be empty")]
    EmptySecret,

    #[error("hashing failed: {0}")]
    Hash(String),
}

/// Salted, adaptive one-way hashing of credential secrets.
///
/// CPU-bound by design; callers under an async runtime should run `hash` and
/// `verify` on a blocking worker.
#[derive(Clone)]
pub struct PasswordHasher {
    argon: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            argon: Argon2::default(),
        }
    }
}

impl PasswordHasher {
    /// Build a hasher with explicit cost parameters.
    ///
    /// Fatal at startup on out-of-range parameters; there is no valid reason
    /// to run with a misconfigured work factor.
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;
        Ok(Self {
            argon: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
        })
    }

    /// Hash a secret with a fresh random salt.
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        if secret.is_empty() {
            return Err(PasswordError::EmptySecret);
        }

        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hash(e.to_string()))?;

        Ok(digest.to_string())
    }

    /// Verify a secret against a stored digest.
    ///
    /// A malformed or corrupted digest is "no match", never an error: stored
    /// data must not be able to crash a login attempt.
    pub fn verify(&self, secret: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        self.argon
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal cost so the suite stays fast; the contract is parameter-independent.
    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST)
            .unwrap()
    }

    #[test]
    fn hash_then_verify_round_trips() {
        let hasher = cheap_hasher();
        let digest = hasher.hash("s3cret-pass").unwrap();
        assert!(hasher.verify("s3cret-pass", &digest));
    }

    #[test]
    fn wrong_secret_does_not_verify() {
        let hasher = cheap_hasher();
        let digest = hasher.hash("s3cret-pass").unwrap();
        assert!(!hasher.verify("other-pass", &digest));
    }

    #[test]
    fn same_secret_hashes_to_distinct_digests() {
        let hasher = cheap_hasher();
        let a = hasher.hash("s3cret-pass").unwrap();
        let b = hasher.hash("s3cret-pass").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify("s3cret-pass", &a));
        assert!(hasher.verify("s3cret-pass", &b));
    }

    #[test]
    fn digest_never_contains_plaintext() {
        let hasher = cheap_hasher();
        let digest = hasher.hash("s3cret-pass").unwrap();
        assert!(!digest.contains("s3cret-pass"));
    }

    #[test]
    fn empty_secret_is_rejected() {
        let hasher = cheap_hasher();
        assert_eq!(hasher.hash(""), Err(PasswordError::EmptySecret));
    }

    #[test]
    fn malformed_digest_verifies_false_not_panic() {
        let hasher = cheap_hasher();
        assert!(!hasher.verify("anything", ""));
        assert!(!hasher.verify("anything", "not-a-phc-string"));
        assert!(!hasher.verify("anything", "$argon2id$v=19$corrupted"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 8,
                ..ProptestConfig::default()
            })]

            #[test]
            fn any_nonempty_secret_round_trips(secret in "[a-zA-Z0-9 !@#]{1,32}") {
                let hasher = cheap_hasher();
                let digest = hasher.hash(&secret).unwrap();
                prop_assert!(hasher.verify(&secret, &digest));
            }

            #[test]
            fn distinct_secrets_do_not_cross_verify(
                a in "[a-z]{4,16}",
                b in "[A-Z]{4,16}",
            ) {
                let hasher = cheap_hasher();
                let digest = hasher.hash(&a).unwrap();
                prop_assert!(!hasher.verify(&b, &digest));
            }
        }
    }
}
