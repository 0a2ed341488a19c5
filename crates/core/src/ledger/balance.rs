//! Net balance calculation over ledger entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{Direction, LedgerEntry};

/// Debit and credit totals for a scoped set of ledger entries.
///
/// The net is `debit_total - credit_total`: debits are inflows, credits are
/// outflows, so the net is what is actually available from that source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPosition {
    /// Sum of all debit (inflow) amounts.
    pub debit_total: Decimal,
    /// Sum of all credit (outflow) amounts.
    pub credit_total: Decimal,
}

impl NetPosition {
    /// An empty position (both totals zero, net zero).
    pub const ZERO: Self = Self {
        debit_total: Decimal::ZERO,
        credit_total: Decimal::ZERO,
    };

    /// Accumulates one entry's amount into the matching partition.
    pub fn add(&mut self, direction: Direction, amount: Decimal) {
        match direction {
            Direction::Debit => self.debit_total += amount,
            Direction::Credit => self.credit_total += amount,
        }
    }

    /// Net available amount.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit_total - self.credit_total
    }
}

impl<'a> FromIterator<&'a LedgerEntry> for NetPosition {
    fn from_iter<I: IntoIterator<Item = &'a LedgerEntry>>(entries: I) -> Self {
        let mut position = Self::ZERO;
        for entry in entries {
            position.add(entry.direction, entry.amount);
        }
        position
    }
}

/// Net balance of a sequence of ledger entries.
///
/// Partitions entries by direction, sums each partition, and returns
/// `debit_total - credit_total`. An empty sequence is zero on both sides,
/// not an error.
#[must_use]
pub fn net_balance<'a, I>(entries: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries.into_iter().collect::<NetPosition>().net()
}
