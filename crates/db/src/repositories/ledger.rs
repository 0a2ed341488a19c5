//! Ledger entry repository: manual entries, listings, and balances.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use munim_core::ledger::{Direction, LedgerEntry, LedgerKind, NetPosition};
use munim_shared::types::OwnerId;
use rust_decimal::Decimal;

use crate::store::Store;

/// Repository for cash and bank ledger entries.
#[derive(Clone)]
pub struct LedgerRepository {
    store: Arc<Store>,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Records a manual ledger entry.
    pub fn record(
        &self,
        owner: OwnerId,
        kind: LedgerKind,
        source: &str,
        direction: Direction,
        amount: Decimal,
        date: Option<DateTime<Utc>>,
    ) -> LedgerEntry {
        let entry = LedgerEntry::new(
            owner,
            kind,
            source,
            direction,
            amount,
            date.unwrap_or_else(Utc::now),
        );
        self.store
            .write()
            .entries
            .insert(entry.id, entry.clone());
        entry
    }

    /// Lists an owner's entries for one ledger, newest first.
    #[must_use]
    pub fn list(&self, owner: OwnerId, kind: LedgerKind) -> Vec<LedgerEntry> {
        let mut entries: Vec<_> = self
            .store
            .read()
            .entries
            .values()
            .filter(|entry| entry.owner == owner && entry.kind == kind)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Lists an owner's entries for one ledger within `[from, to)`, newest first.
    #[must_use]
    pub fn list_range(
        &self,
        owner: OwnerId,
        kind: LedgerKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<LedgerEntry> {
        let mut entries: Vec<_> = self
            .store
            .read()
            .entries
            .values()
            .filter(|entry| {
                entry.owner == owner && entry.kind == kind && entry.date >= from && entry.date < to
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Debit/credit totals and net balance for one ledger.
    #[must_use]
    pub fn net_position(&self, owner: OwnerId, kind: LedgerKind) -> NetPosition {
        self.store
            .read()
            .entries
            .values()
            .filter(|entry| entry.owner == owner && entry.kind == kind)
            .collect()
    }
}
