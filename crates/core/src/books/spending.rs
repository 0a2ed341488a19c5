//! Expenses, expense categories, and owner drawings.

use chrono::{DateTime, Utc};
use munim_shared::types::{CategoryId, DrawingId, ExpenseId, OwnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A business expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning user.
    pub owner: OwnerId,
    /// What the money was spent on.
    pub name: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Category name, when the expense was filed under one.
    pub category: Option<String>,
    /// Expense date.
    pub date: DateTime<Utc>,
}

/// A named expense category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Owning user.
    pub owner: OwnerId,
    /// Category name.
    pub name: String,
}

impl ExpenseCategory {
    /// Creates a new category.
    #[must_use]
    pub fn new(owner: OwnerId, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            owner,
            name: name.into(),
        }
    }
}

/// What an owner drawing took out of the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingKind {
    /// Cash taken from the cash ledger.
    Cash,
    /// Stock taken from inventory.
    Stock,
}

/// An owner drawing.
///
/// For stock drawings the amount is the computed value of the withdrawn
/// units at their stated prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    /// Drawing ID.
    pub id: DrawingId,
    /// Owning user.
    pub owner: OwnerId,
    /// Cash or stock.
    pub kind: DrawingKind,
    /// Value withdrawn.
    pub amount: Decimal,
    /// Drawing date.
    pub date: DateTime<Utc>,
}
