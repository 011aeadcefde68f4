//! Expense ledger types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Unique identifier for an expense.
pub type ExpenseId = u64;

/// A single ledger entry owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense ID, assigned by the store.
    pub id: ExpenseId,
    /// Owning user. Immutable; every query is scoped by it.
    pub user_id: UserId,
    /// Amount spent.
    pub amount: f64,
    /// When the expense occurred.
    pub date: DateTime<Utc>,
    /// Spending category (e.g. "food").
    pub category: String,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Fields for a new expense; the ID is assigned by the store on insert.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Owning user.
    pub user_id: UserId,
    /// Amount spent.
    pub amount: f64,
    /// When the expense occurred.
    pub date: DateTime<Utc>,
    /// Spending category.
    pub category: String,
    /// Free-form notes.
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expense_serialization() {
        let expense = Expense {
            id: 7,
            user_id: 1,
            amount: 12.5,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            category: "food".to_string(),
            notes: None,
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["amount"], 12.5);
        assert_eq!(json["date"], "2024-01-01T00:00:00Z");
        // Absent notes are omitted rather than serialized as null.
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_expense_roundtrip_with_notes() {
        let expense = Expense {
            id: 1,
            user_id: 2,
            amount: 9.99,
            date: Utc.with_ymd_and_hms(2024, 6, 15, 12, 30, 0).unwrap(),
            category: "transport".to_string(),
            notes: Some("bus fare".to_string()),
        };

        let json = serde_json::to_string(&expense).unwrap();
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back.notes.as_deref(), Some("bus fare"));
        assert_eq!(back.date, expense.date);
    }
}
