//! Password hashing and verification.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::password_hash::{PasswordHasher as _, PasswordVerifier as _};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::AuthError;
use crate::Result;

/// Default time-cost, balancing brute-force resistance against per-request
/// latency.
pub const DEFAULT_HASH_COST: u32 = 10;

/// Salted one-way password hasher with a tunable cost factor.
///
/// Produces PHC-format Argon2id digests with an embedded random salt.
/// Verification is constant-time with respect to where a mismatch occurs.
#[derive(Clone)]
pub struct PasswordHasher {
    argon: Argon2<'static>,
}

impl PasswordHasher {
    /// Creates a hasher with the given time-cost (iteration count). Memory
    /// and parallelism stay at the scheme defaults.
    pub fn with_cost(cost: u32) -> Result<Self> {
        let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
            .map_err(|e| AuthError::Hash(e.to_string()))?;

        Ok(Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password with a freshly generated salt.
    pub fn hash(&self, plaintext: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    /// Verifies a plaintext password against a stored digest.
    ///
    /// Unparseable digests verify as false rather than erroring, so a
    /// corrupt row reads as bad credentials instead of a server fault.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(digest) else {
            return false;
        };

        self.argon
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::with_cost(DEFAULT_HASH_COST).expect("default cost parameters are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        // Minimum cost keeps the test suite fast.
        PasswordHasher::with_cost(1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("hunter2").unwrap();

        assert!(digest.starts_with("$argon2id$"));
        assert!(hasher.verify("hunter2", &digest));
        assert!(!hasher.verify("hunter3", &digest));
    }

    #[test]
    fn test_salts_are_unique() {
        let hasher = hasher();
        let a = hasher.hash("hunter2").unwrap();
        let b = hasher.hash("hunter2").unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("hunter2", &a));
        assert!(hasher.verify("hunter2", &b));
    }

    #[test]
    fn test_garbage_digest_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("hunter2", "not-a-phc-string"));
        assert!(!hasher.verify("hunter2", ""));
    }

    #[test]
    fn test_zero_cost_rejected() {
        assert!(PasswordHasher::with_cost(0).is_err());
    }
}
