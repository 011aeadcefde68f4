//! Storage backend trait.
//!
//! Defines the interface the rest of the system uses to query the ledger,
//! keeping the concrete engine pluggable.

use std::sync::Arc;

use tally_types::{Expense, ExpenseId, NewExpense, User, UserId};

use crate::Result;

/// Outcome of a phone-number lookup.
///
/// An explicit two-variant result so callers pattern-match the branch
/// instead of testing an option for null-ness.
#[derive(Debug, Clone)]
pub enum UserLookup {
    /// A user is registered under this phone number.
    Found(User),
    /// No user is registered under this phone number.
    NotFound,
}

/// Trait for ledger storage backends.
///
/// Every expense query takes the owning user id; there is no way to read or
/// delete another user's rows through this interface. Conflicting writes are
/// serialized by the backend itself: a concurrent duplicate registration must
/// surface as [`StoreError::PhoneNumberExists`](crate::StoreError::PhoneNumberExists)
/// on exactly one of the inserts.
pub trait LedgerStore: Send + Sync {
    /// Looks up a user by phone number.
    fn find_user_by_phone(&self, phone_number: &str) -> Result<UserLookup>;

    /// Inserts a new user, enforcing phone-number uniqueness.
    fn insert_user(&self, phone_number: &str, password_hash: &str) -> Result<User>;

    /// Inserts an expense and returns the stored row with its assigned id.
    fn insert_expense(&self, new: NewExpense) -> Result<Expense>;

    /// Lists an owner's expenses, newest date first, optionally filtered by
    /// category.
    fn list_expenses(&self, owner: UserId, category: Option<&str>) -> Result<Vec<Expense>>;

    /// Fetches an expense if it exists and belongs to `owner`.
    fn get_expense(&self, id: ExpenseId, owner: UserId) -> Result<Option<Expense>>;

    /// Deletes an expense if it exists and belongs to `owner`; returns
    /// whether a row was removed.
    fn delete_expense(&self, id: ExpenseId, owner: UserId) -> Result<bool>;

    /// Startup connectivity probe.
    fn ping(&self) -> Result<()>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for Arc<T> {
    fn find_user_by_phone(&self, phone_number: &str) -> Result<UserLookup> {
        (**self).find_user_by_phone(phone_number)
    }

    fn insert_user(&self, phone_number: &str, password_hash: &str) -> Result<User> {
        (**self).insert_user(phone_number, password_hash)
    }

    fn insert_expense(&self, new: NewExpense) -> Result<Expense> {
        (**self).insert_expense(new)
    }

    fn list_expenses(&self, owner: UserId, category: Option<&str>) -> Result<Vec<Expense>> {
        (**self).list_expenses(owner, category)
    }

    fn get_expense(&self, id: ExpenseId, owner: UserId) -> Result<Option<Expense>> {
        (**self).get_expense(id, owner)
    }

    fn delete_expense(&self, id: ExpenseId, owner: UserId) -> Result<bool> {
        (**self).delete_expense(id, owner)
    }

    fn ping(&self) -> Result<()> {
        (**self).ping()
    }
}
