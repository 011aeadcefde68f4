//! Signed bearer tokens.
//!
//! Token format: `<payload>.<signature>` where the payload is the
//! base64url-encoded JSON claims and the signature is an HMAC-SHA256 over
//! the encoded payload. Tokens are self-contained: the server keeps no
//! session state and possession of a valid, unexpired token is
//! authorization.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use tally_types::UserId;

use crate::error::AuthError;
use crate::Result;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime: 7 days.
pub const DEFAULT_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Claims carried inside a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    user_id: UserId,
    issued_at: u64,
    expires_at: u64,
}

/// Issues and verifies MAC-signed tokens under an immutable server secret.
///
/// Deliberately not `Debug`: the key must never end up in logs.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
}

impl TokenSigner {
    /// Creates a signer holding the given secret.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self { key: secret.into() }
    }

    /// Issues a token for `user_id` that expires `ttl_secs` from now.
    pub fn issue(&self, user_id: UserId, ttl_secs: u64) -> String {
        let now = unix_now();
        let claims = Claims {
            user_id,
            issued_at: now,
            expires_at: now.saturating_add(ttl_secs),
        };

        let payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("claims always serialize"));
        let signature = URL_SAFE_NO_PAD.encode(self.sign(payload.as_bytes()));

        format!("{payload}.{signature}")
    }

    /// Verifies a token and returns the user id it asserts.
    ///
    /// Malformed, tampered, and expired tokens all fail with the same
    /// [`AuthError::InvalidToken`]; the distinction is not exposed.
    pub fn verify(&self, token: &str) -> Result<UserId> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::InvalidToken)?;

        // Constant-time comparison via the MAC itself.
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can accept any key length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken)?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: Claims =
            serde_json::from_slice(&bytes).map_err(|_| AuthError::InvalidToken)?;

        if unix_now() >= claims.expires_at {
            return Err(AuthError::InvalidToken);
        }

        Ok(claims.user_id)
    }

    fn sign(&self, data: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can accept any key length");
        mac.update(data);
        mac.finalize().into_bytes().to_vec()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(42, DEFAULT_TTL_SECS);

        assert_eq!(signer.verify(&token).unwrap(), 42);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = TokenSigner::new("secret");
        let other = TokenSigner::new("other-secret");

        let token = signer.issue(42, DEFAULT_TTL_SECS);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_structurally_invalid_rejected() {
        let signer = TokenSigner::new("secret");

        assert!(signer.verify("").is_err());
        assert!(signer.verify("abc.def").is_err());
        assert!(signer.verify("no-separator").is_err());
        assert!(signer.verify("a.b.c").is_err());
    }

    #[test]
    fn test_truncated_token_rejected() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(42, DEFAULT_TTL_SECS);

        let truncated = &token[..token.len() - 5];
        assert!(signer.verify(truncated).is_err());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(42, DEFAULT_TTL_SECS);

        // Swap in a payload asserting a different user, keeping the
        // original signature.
        let (_, signature) = token.split_once('.').unwrap();
        let forged_payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({"user_id": 1, "issued_at": 0, "expires_at": u64::MAX})
                .to_string(),
        );
        let forged = format!("{forged_payload}.{signature}");

        assert!(signer.verify(&forged).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = TokenSigner::new("secret");

        // Zero TTL expires immediately (expiry is inclusive).
        let token = signer.issue(42, 0);
        assert!(signer.verify(&token).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Tokens round-trip for any user id and positive TTL.
        #[test]
        fn prop_roundtrip(user_id in 0u64..u64::MAX, ttl in 60u64..DEFAULT_TTL_SECS) {
            let signer = TokenSigner::new("prop-secret");
            let token = signer.issue(user_id, ttl);
            prop_assert_eq!(signer.verify(&token).unwrap(), user_id);
        }

        /// Arbitrary strings never verify.
        #[test]
        fn prop_garbage_rejected(s in ".*") {
            let signer = TokenSigner::new("prop-secret");
            prop_assert!(signer.verify(&s).is_err());
        }

        /// A token issued under one secret never verifies under another.
        #[test]
        fn prop_secrets_disjoint(a in "[a-z]{1,32}", b in "[a-z]{1,32}") {
            prop_assume!(a != b);
            let token = TokenSigner::new(a.as_bytes().to_vec()).issue(7, 3600);
            prop_assert!(TokenSigner::new(b.as_bytes().to_vec()).verify(&token).is_err());
        }
    }
}
