//! Unified login-or-register resolution.

use std::sync::Arc;

use tally_store::{LedgerStore, StoreError, UserLookup};
use tally_types::{User, UserId};

use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::token::{TokenSigner, DEFAULT_TTL_SECS};
use crate::Result;

/// Outcome of a successful authentication.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// The phone number was unseen; a new account was created.
    Registered {
        /// Freshly issued bearer token.
        token: String,
    },
    /// The phone number was known and the password matched.
    LoggedIn {
        /// Freshly issued bearer token.
        token: String,
    },
}

/// The unified login-or-register decision procedure.
///
/// Holds the store seam, the password hasher, and the token signer. The
/// signer is optional: a deployment without a configured secret keeps
/// serving, but every authentication fails with
/// [`AuthError::MissingSecret`].
pub struct AuthResolver {
    store: Arc<dyn LedgerStore>,
    hasher: PasswordHasher,
    signer: Option<TokenSigner>,
}

impl AuthResolver {
    /// Creates a resolver over the given store and primitives.
    pub fn new(
        store: Arc<dyn LedgerStore>,
        hasher: PasswordHasher,
        signer: Option<TokenSigner>,
    ) -> Self {
        Self {
            store,
            hasher,
            signer,
        }
    }

    /// Authenticates a credential pair: logs a known phone number in,
    /// transparently registers an unseen one.
    ///
    /// Callers validate field presence first; this method assumes both
    /// arguments are non-empty.
    pub fn authenticate(&self, phone_number: &str, password: &str) -> Result<AuthOutcome> {
        let signer = self.signer.as_ref().ok_or(AuthError::MissingSecret)?;

        match self.store.find_user_by_phone(phone_number)? {
            UserLookup::Found(user) => self.login(signer, &user, password),
            UserLookup::NotFound => self.register(signer, phone_number, password),
        }
    }

    /// Verifies a bearer token and returns the user id it asserts.
    pub fn verify_token(&self, token: &str) -> Result<UserId> {
        let signer = self.signer.as_ref().ok_or(AuthError::MissingSecret)?;
        signer.verify(token)
    }

    fn login(&self, signer: &TokenSigner, user: &User, password: &str) -> Result<AuthOutcome> {
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthOutcome::LoggedIn {
            token: signer.issue(user.id, DEFAULT_TTL_SECS),
        })
    }

    fn register(
        &self,
        signer: &TokenSigner,
        phone_number: &str,
        password: &str,
    ) -> Result<AuthOutcome> {
        let digest = self.hasher.hash(password)?;

        match self.store.insert_user(phone_number, &digest) {
            Ok(user) => Ok(AuthOutcome::Registered {
                token: signer.issue(user.id, DEFAULT_TTL_SECS),
            }),
            // Lost the race against a concurrent registration of the same
            // phone number: the row exists now, so retry as a login.
            Err(StoreError::PhoneNumberExists) => {
                tracing::debug!(
                    phone_number = %phone_number,
                    "registration raced an existing insert, retrying as login"
                );
                match self.store.find_user_by_phone(phone_number)? {
                    UserLookup::Found(user) => self.login(signer, &user, password),
                    UserLookup::NotFound => Err(AuthError::InvalidCredentials),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}
