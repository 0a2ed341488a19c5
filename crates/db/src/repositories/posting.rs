//! The posting service.
//!
//! Wires the three collaborators of one posting together: a read view over
//! the owner's data, the pure engine, and the atomic writer. The whole
//! sequence runs while holding the store's writer lock, so the sufficiency
//! check and the commit are a single serialized unit per store - two
//! concurrent postings against the same funding source cannot both pass
//! validation on the same balance.

use std::sync::Arc;

use chrono::Utc;
use munim_shared::types::{
    AssetId, CategoryId, CreditorId, CustomerId, LiabilityId, OwnerId, ProductId, PurchaseId,
    SaleId,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use munim_core::books::{Asset, ExpenseCategory, Liability, Purchase, Sale};
use munim_core::inventory::Product;
use munim_core::ledger::{LedgerKind, net_balance};
use munim_core::party::{Creditor, Customer};
use munim_core::posting::{Document, PostingContext, PostingEngine, PostingError, PostingEvent};

use crate::store::{Collections, CommitError, Store, apply_plan};

/// Errors from posting an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// The engine rejected the event; nothing was written.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// The built plan failed to apply; nothing was written.
    #[error("commit failed: {0}")]
    Commit(#[from] CommitError),
}

/// Posts business events against the store.
#[derive(Clone)]
pub struct PostingService {
    store: Arc<Store>,
}

impl PostingService {
    /// Creates a new posting service.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Posts one business event and returns the primary document.
    ///
    /// # Errors
    ///
    /// Returns `PostError` when validation or the commit fails; in both
    /// cases no writes are observable.
    pub fn post(&self, owner: OwnerId, event: PostingEvent) -> Result<Document, PostError> {
        let kind = event.kind();
        let mut collections = self.store.write();

        let posting = {
            let view = OwnerView {
                collections: &*collections,
                owner,
            };
            PostingEngine::post(owner, event, Utc::now(), &view)
        };

        let posting = match posting {
            Ok(posting) => posting,
            Err(error) => {
                warn!(%owner, event = kind, code = error.error_code(), "posting rejected");
                return Err(error.into());
            }
        };

        let ops = posting.plan.len();
        apply_plan(&mut collections, posting.plan)?;
        info!(%owner, event = kind, ops, "posting committed");

        Ok(posting.document)
    }
}

/// Read-only view of the collections for one posting.
struct OwnerView<'a> {
    collections: &'a Collections,
    owner: OwnerId,
}

impl PostingContext for OwnerView<'_> {
    fn net_balance(&self, kind: LedgerKind) -> Decimal {
        net_balance(
            self.collections
                .entries
                .values()
                .filter(|entry| entry.owner == self.owner && entry.kind == kind),
        )
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.collections.products.get(&id).cloned()
    }

    fn product_by_name(&self, name: &str) -> Option<Product> {
        self.collections
            .products
            .values()
            .find(|product| {
                product.owner == self.owner && product.product_name.eq_ignore_ascii_case(name)
            })
            .cloned()
    }

    fn creditor(&self, id: CreditorId) -> Option<Creditor> {
        self.collections.creditors.get(&id).cloned()
    }

    fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.collections.customers.get(&id).cloned()
    }

    fn purchase(&self, id: PurchaseId) -> Option<Purchase> {
        self.collections.purchases.get(&id).cloned()
    }

    fn sale(&self, id: SaleId) -> Option<Sale> {
        self.collections.sales.get(&id).cloned()
    }

    fn asset(&self, id: AssetId) -> Option<Asset> {
        self.collections.assets.get(&id).cloned()
    }

    fn asset_by_name(&self, name: &str) -> Option<Asset> {
        self.collections
            .assets
            .values()
            .find(|asset| asset.owner == self.owner && asset.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn liability(&self, id: LiabilityId) -> Option<Liability> {
        self.collections.liabilities.get(&id).cloned()
    }

    fn category(&self, id: CategoryId) -> Option<ExpenseCategory> {
        self.collections.categories.get(&id).cloned()
    }

    fn category_by_name(&self, name: &str) -> Option<ExpenseCategory> {
        self.collections
            .categories
            .values()
            .find(|category| {
                category.owner == self.owner && category.name.eq_ignore_ascii_case(name)
            })
            .cloned()
    }

    fn quantity_returned_for_purchase(&self, id: PurchaseId) -> i64 {
        self.collections
            .purchase_returns
            .values()
            .filter(|purchase_return| purchase_return.purchase.id == id)
            .map(|purchase_return| purchase_return.quantity)
            .sum()
    }

    fn quantity_returned_for_sale(&self, id: SaleId, product: ProductId) -> i64 {
        self.collections
            .sales_returns
            .values()
            .filter(|sales_return| {
                sales_return.sale.id == id && sales_return.product_id == product
            })
            .map(|sales_return| sales_return.quantity)
            .sum()
    }
}
