//! Assets and liabilities.

use chrono::{DateTime, Utc};
use munim_shared::types::{AssetId, LiabilityId, OwnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID.
    pub id: AssetId,
    /// Owning user.
    pub owner: OwnerId,
    /// Asset name, unique per owner.
    pub name: String,
    /// Outstanding amount; grows on extensions, shrinks on settlements.
    pub amount: Decimal,
    /// Extras paid on acquisition.
    pub other_expenses: Decimal,
    /// Acquisition date.
    pub date: DateTime<Utc>,
}

impl Asset {
    /// Creates a new asset.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        amount: Decimal,
        other_expenses: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AssetId::new(),
            owner,
            name: name.into(),
            amount,
            other_expenses,
            date,
        }
    }
}

/// A loan or similar liability.
///
/// `amount` is the persisted outstanding balance: principal plus the simple
/// interest for the full term, computed at draw-down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Liability {
    /// Liability ID.
    pub id: LiabilityId,
    /// Owning user.
    pub owner: OwnerId,
    /// Liability name.
    pub name: String,
    /// Outstanding amount (principal + interest, less settlements).
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Term in months.
    pub term_months: i64,
    /// Extras paid on draw-down.
    pub other_expenses: Decimal,
    /// Draw-down date.
    pub date: DateTime<Utc>,
}

/// Simple interest over a term expressed in months.
///
/// `principal * rate * (term_months / 12) / 100`.
#[must_use]
pub fn simple_interest(principal: Decimal, rate: Decimal, term_months: i64) -> Decimal {
    principal * rate * Decimal::from(term_months) / Decimal::from(12) / Decimal::from(100)
}
