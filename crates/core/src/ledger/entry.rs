//! Ledger entry domain types.
//!
//! A ledger entry is a single directional cash or bank movement recorded for
//! a party. The amount is always positive; the sign of the effect is carried
//! by the direction, never by a negative amount.

use chrono::{DateTime, Utc};
use munim_shared::types::{EntryId, OwnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which physical ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerKind {
    /// The cash-in-hand ledger.
    Cash,
    /// The bank ledger.
    Bank,
}

impl LedgerKind {
    /// Human-readable name, used in messages and entry sources.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

impl std::fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::error::Error for LedgerKind {}

/// Entry direction: debit is money arriving, credit is money leaving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Inflow.
    Debit,
    /// Outflow.
    Credit,
}

impl Direction {
    /// Applies this direction's sign to a positive amount.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Debit => amount,
            Self::Credit => -amount,
        }
    }
}

/// A single cash or bank movement.
///
/// Entries are append-only: posting never mutates or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: EntryId,
    /// Owning user.
    pub owner: OwnerId,
    /// Which ledger this entry belongs to.
    pub kind: LedgerKind,
    /// Where the money came from or went to (free-form label).
    pub source: String,
    /// Debit (inflow) or credit (outflow).
    pub direction: Direction,
    /// Positive amount.
    pub amount: Decimal,
    /// When the movement happened.
    pub date: DateTime<Utc>,
}

impl LedgerEntry {
    /// Creates a new ledger entry.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        kind: LedgerKind,
        source: impl Into<String>,
        direction: Direction,
        amount: Decimal,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            owner,
            kind,
            source: source.into(),
            direction,
            amount,
            date,
        }
    }
}
