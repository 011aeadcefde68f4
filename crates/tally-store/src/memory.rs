//! In-memory ledger store.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use tally_types::{Expense, ExpenseId, NewExpense, User, UserId};

use crate::error::StoreError;
use crate::traits::{LedgerStore, UserLookup};
use crate::Result;

/// In-memory reference backend.
///
/// Holds users and expenses in `RwLock`-guarded maps with a phone-number
/// index. The write lock over the phone index is what serializes concurrent
/// registrations for the same number.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    phone_index: RwLock<HashMap<String, UserId>>,
    expenses: RwLock<HashMap<ExpenseId, Expense>>,
    next_user_id: AtomicU64,
    next_expense_id: AtomicU64,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            phone_index: RwLock::new(HashMap::new()),
            expenses: RwLock::new(HashMap::new()),
            next_user_id: AtomicU64::new(1),
            next_expense_id: AtomicU64::new(1),
        }
    }

    /// Number of registered users.
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }

    /// Number of stored expenses across all users.
    pub fn expense_count(&self) -> usize {
        self.expenses.read().len()
    }
}

impl LedgerStore for MemoryStore {
    fn find_user_by_phone(&self, phone_number: &str) -> Result<UserLookup> {
        let phone_index = self.phone_index.read();
        let Some(id) = phone_index.get(phone_number) else {
            return Ok(UserLookup::NotFound);
        };

        match self.users.read().get(id) {
            Some(user) => Ok(UserLookup::Found(user.clone())),
            None => Err(StoreError::Backend(format!(
                "phone index points at missing user {id}"
            ))),
        }
    }

    fn insert_user(&self, phone_number: &str, password_hash: &str) -> Result<User> {
        let mut phone_index = self.phone_index.write();
        let mut users = self.users.write();

        if phone_index.contains_key(phone_number) {
            return Err(StoreError::PhoneNumberExists);
        }

        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(id, phone_number.to_string(), password_hash.to_string());

        phone_index.insert(phone_number.to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }

    fn insert_expense(&self, new: NewExpense) -> Result<Expense> {
        let id = self.next_expense_id.fetch_add(1, Ordering::SeqCst);
        let expense = Expense {
            id,
            user_id: new.user_id,
            amount: new.amount,
            date: new.date,
            category: new.category,
            notes: new.notes,
        };

        self.expenses.write().insert(id, expense.clone());
        Ok(expense)
    }

    fn list_expenses(&self, owner: UserId, category: Option<&str>) -> Result<Vec<Expense>> {
        let expenses = self.expenses.read();
        let mut rows: Vec<Expense> = expenses
            .values()
            .filter(|e| e.user_id == owner)
            .filter(|e| category.is_none_or(|c| e.category == c))
            .cloned()
            .collect();

        // Newest first; ties broken by id so the order is stable.
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    fn get_expense(&self, id: ExpenseId, owner: UserId) -> Result<Option<Expense>> {
        Ok(self
            .expenses
            .read()
            .get(&id)
            .filter(|e| e.user_id == owner)
            .cloned())
    }

    fn delete_expense(&self, id: ExpenseId, owner: UserId) -> Result<bool> {
        let mut expenses = self.expenses.write();
        match expenses.get(&id) {
            Some(e) if e.user_id == owner => {
                expenses.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense(owner: UserId, day: u32, category: &str) -> NewExpense {
        NewExpense {
            user_id: owner,
            amount: 10.0,
            date: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            category: category.to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_insert_and_find_user() {
        let store = MemoryStore::new();

        assert!(matches!(
            store.find_user_by_phone("+15551234").unwrap(),
            UserLookup::NotFound
        ));

        let user = store.insert_user("+15551234", "hash").unwrap();
        assert_eq!(user.id, 1);

        match store.find_user_by_phone("+15551234").unwrap() {
            UserLookup::Found(found) => {
                assert_eq!(found.id, user.id);
                assert_eq!(found.password_hash, "hash");
            }
            UserLookup::NotFound => panic!("expected user to be found"),
        }
    }

    #[test]
    fn test_duplicate_phone_rejected() {
        let store = MemoryStore::new();
        store.insert_user("+15551234", "hash-a").unwrap();

        let err = store.insert_user("+15551234", "hash-b").unwrap_err();
        assert!(matches!(err, StoreError::PhoneNumberExists));
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_list_is_owner_scoped_and_ordered() {
        let store = MemoryStore::new();
        store.insert_expense(expense(1, 2, "food")).unwrap();
        store.insert_expense(expense(1, 5, "transport")).unwrap();
        store.insert_expense(expense(2, 3, "food")).unwrap();
        store.insert_expense(expense(1, 3, "food")).unwrap();

        let rows = store.list_expenses(1, None).unwrap();
        assert_eq!(rows.len(), 3);
        let days: Vec<u32> = rows
            .iter()
            .map(|e| e.date.format("%d").to_string().parse().unwrap())
            .collect();
        assert_eq!(days, vec![5, 3, 2]);
        assert!(rows.iter().all(|e| e.user_id == 1));
    }

    #[test]
    fn test_list_category_filter() {
        let store = MemoryStore::new();
        store.insert_expense(expense(1, 1, "food")).unwrap();
        store.insert_expense(expense(1, 2, "transport")).unwrap();

        let rows = store.list_expenses(1, Some("food")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "food");

        let rows = store.list_expenses(1, Some("rent")).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_same_date_orders_by_newest_id() {
        let store = MemoryStore::new();
        let first = store.insert_expense(expense(1, 1, "food")).unwrap();
        let second = store.insert_expense(expense(1, 1, "food")).unwrap();

        let rows = store.list_expenses(1, None).unwrap();
        assert_eq!(rows[0].id, second.id);
        assert_eq!(rows[1].id, first.id);
    }

    #[test]
    fn test_get_and_delete_respect_ownership() {
        let store = MemoryStore::new();
        let owned = store.insert_expense(expense(1, 1, "food")).unwrap();

        assert!(store.get_expense(owned.id, 1).unwrap().is_some());
        assert!(store.get_expense(owned.id, 2).unwrap().is_none());

        // The wrong owner cannot delete the row.
        assert!(!store.delete_expense(owned.id, 2).unwrap());
        assert_eq!(store.expense_count(), 1);

        assert!(store.delete_expense(owned.id, 1).unwrap());
        assert!(!store.delete_expense(owned.id, 1).unwrap());
        assert_eq!(store.expense_count(), 0);
    }
}
