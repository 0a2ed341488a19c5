//! Cash and bank ledger logic.
//!
//! This module implements the ledger functionality:
//! - Ledger entries (directional cash/bank movements)
//! - Net balance calculation over signed entries

pub mod balance;
pub mod entry;

pub use balance::{NetPosition, net_balance};
pub use entry::{Direction, LedgerEntry, LedgerKind};
