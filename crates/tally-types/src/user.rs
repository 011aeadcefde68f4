//! User account types.

use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a user.
pub type UserId = u64;

/// A user account in the system.
///
/// Accounts are created exactly once, on the first authentication attempt
/// with an unseen phone number, and are never mutated or deleted afterwards.
/// The password hash is a PHC-format string with an embedded salt; it stays
/// server-side and is deliberately excluded from any wire representation.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID, assigned by the store.
    pub id: UserId,
    /// Phone number used as the login key. Unique, immutable.
    pub phone_number: String,
    /// Salted one-way hash of the password.
    pub password_hash: String,
    /// Unix timestamp when the account was created.
    pub created_at: u64,
}

impl User {
    /// Create a new user.
    pub fn new(id: UserId, phone_number: String, password_hash: String) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        Self {
            id,
            phone_number,
            password_hash,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user() {
        let user = User::new(1, "+15551234".to_string(), "$argon2id$stub".to_string());
        assert_eq!(user.id, 1);
        assert_eq!(user.phone_number, "+15551234");
        assert_eq!(user.password_hash, "$argon2id$stub");
        assert!(user.created_at > 0);
    }
}
