//! The in-process document store and atomic writer.
//!
//! All collections sit behind a single `RwLock`, which is what makes a
//! committed write plan all-or-nothing and invisible until complete: readers
//! never observe a plan mid-apply, and the posting service holds the writer
//! lock across its read-validate-commit sequence so two postings against the
//! same funding source serialize.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use munim_shared::types::{
    AssetId, CategoryId, CreditorId, CustomerId, DrawingId, EntryId, ExpenseId, LiabilityId,
    ProductId, PurchaseId, PurchaseReturnId, SaleId, SalesReturnId,
};
use thiserror::Error;
use uuid::Uuid;

use munim_core::books::{
    Asset, Drawing, Expense, ExpenseCategory, Liability, Purchase, PurchaseReturn, Sale,
    SalesReturn,
};
use munim_core::inventory::Product;
use munim_core::ledger::LedgerEntry;
use munim_core::party::{Creditor, Customer};
use munim_core::posting::{Collection, Delta, Document, WriteOp, WritePlan};

/// Errors from single-document repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested document does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The document exists but belongs to a different owner.
    #[error("Not authorized")]
    NotOwned,
}

/// Errors from committing a write plan.
///
/// A failed commit applies nothing: verification runs over the whole plan
/// before the first op is applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// An adjust op targets a document that does not exist.
    #[error("adjust target missing in {collection:?}: {id}")]
    MissingTarget {
        /// Collection the op addressed.
        collection: Collection,
        /// Document id the op addressed.
        id: Uuid,
    },

    /// An adjust op carries a delta the collection cannot absorb.
    #[error("delta does not apply to collection {collection:?}")]
    InvalidDelta {
        /// Collection the op addressed.
        collection: Collection,
    },
}

/// Every collection the store holds.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub entries: HashMap<EntryId, LedgerEntry>,
    pub products: HashMap<ProductId, Product>,
    pub creditors: HashMap<CreditorId, Creditor>,
    pub customers: HashMap<CustomerId, Customer>,
    pub purchases: HashMap<PurchaseId, Purchase>,
    pub sales: HashMap<SaleId, Sale>,
    pub purchase_returns: HashMap<PurchaseReturnId, PurchaseReturn>,
    pub sales_returns: HashMap<SalesReturnId, SalesReturn>,
    pub assets: HashMap<AssetId, Asset>,
    pub liabilities: HashMap<LiabilityId, Liability>,
    pub expenses: HashMap<ExpenseId, Expense>,
    pub categories: HashMap<CategoryId, ExpenseCategory>,
    pub drawings: HashMap<DrawingId, Drawing>,
}

/// The in-process document store.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<Collections>,
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Collections> {
        // A poisoned lock still hands back the data; plans are verified
        // before any op is applied, so the collections stay coherent.
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commits a write plan as a single all-or-nothing unit.
    ///
    /// # Errors
    ///
    /// Returns `CommitError` without applying any op when the plan cannot be
    /// applied in full.
    pub fn commit(&self, plan: WritePlan) -> Result<(), CommitError> {
        let mut collections = self.write();
        apply_plan(&mut collections, plan)
    }
}

/// Verifies and applies a plan against the collections.
///
/// Verification covers every op before the first apply, so an error means
/// nothing was written. Verification runs against the pre-plan state: plans
/// only adjust documents that already exist, never ones they insert.
pub(crate) fn apply_plan(
    collections: &mut Collections,
    plan: WritePlan,
) -> Result<(), CommitError> {
    for op in plan.ops() {
        if let WriteOp::AdjustById {
            collection,
            id,
            delta,
        } = op
        {
            verify_adjust(collections, *collection, *id, *delta)?;
        }
    }

    for op in plan.into_ops() {
        match op {
            WriteOp::Insert(document) => insert_document(collections, document),
            WriteOp::AdjustById {
                collection,
                id,
                delta,
            } => apply_adjust(collections, collection, id, delta),
        }
    }

    Ok(())
}

fn verify_adjust(
    collections: &Collections,
    collection: Collection,
    id: Uuid,
    delta: Delta,
) -> Result<(), CommitError> {
    let present = match (collection, delta) {
        (Collection::Products, Delta::Quantity(_)) => collections
            .products
            .contains_key(&ProductId::from_uuid(id)),
        (Collection::Creditors, Delta::Money(_)) => collections
            .creditors
            .contains_key(&CreditorId::from_uuid(id)),
        (Collection::Customers, Delta::Money(_)) => collections
            .customers
            .contains_key(&CustomerId::from_uuid(id)),
        (Collection::Assets, Delta::Money(_)) => {
            collections.assets.contains_key(&AssetId::from_uuid(id))
        }
        (Collection::Liabilities, Delta::Money(_)) => collections
            .liabilities
            .contains_key(&LiabilityId::from_uuid(id)),
        _ => return Err(CommitError::InvalidDelta { collection }),
    };

    if present {
        Ok(())
    } else {
        Err(CommitError::MissingTarget { collection, id })
    }
}

fn insert_document(collections: &mut Collections, document: Document) {
    match document {
        Document::LedgerEntry(entry) => {
            collections.entries.insert(entry.id, entry);
        }
        Document::Product(product) => {
            collections.products.insert(product.id, product);
        }
        Document::Creditor(creditor) => {
            collections.creditors.insert(creditor.id, creditor);
        }
        Document::Customer(customer) => {
            collections.customers.insert(customer.id, customer);
        }
        Document::Purchase(purchase) => {
            collections.purchases.insert(purchase.id, purchase);
        }
        Document::Sale(sale) => {
            collections.sales.insert(sale.id, sale);
        }
        Document::PurchaseReturn(purchase_return) => {
            collections
                .purchase_returns
                .insert(purchase_return.id, purchase_return);
        }
        Document::SalesReturn(sales_return) => {
            collections
                .sales_returns
                .insert(sales_return.id, sales_return);
        }
        Document::Asset(asset) => {
            collections.assets.insert(asset.id, asset);
        }
        Document::Liability(liability) => {
            collections.liabilities.insert(liability.id, liability);
        }
        Document::Expense(expense) => {
            collections.expenses.insert(expense.id, expense);
        }
        Document::ExpenseCategory(category) => {
            collections.categories.insert(category.id, category);
        }
        Document::Drawing(drawing) => {
            collections.drawings.insert(drawing.id, drawing);
        }
    }
}

fn apply_adjust(collections: &mut Collections, collection: Collection, id: Uuid, delta: Delta) {
    // Targets were verified before the first apply; a miss here means the
    // plan itself mutated mid-commit, which the single lock rules out.
    match (collection, delta) {
        (Collection::Products, Delta::Quantity(quantity)) => {
            if let Some(product) = collections.products.get_mut(&ProductId::from_uuid(id)) {
                product.number_in_stock += quantity;
            }
        }
        (Collection::Creditors, Delta::Money(amount)) => {
            if let Some(creditor) = collections.creditors.get_mut(&CreditorId::from_uuid(id)) {
                creditor.due += amount;
            }
        }
        (Collection::Customers, Delta::Money(amount)) => {
            if let Some(customer) = collections.customers.get_mut(&CustomerId::from_uuid(id)) {
                customer.due += amount;
            }
        }
        (Collection::Assets, Delta::Money(amount)) => {
            if let Some(asset) = collections.assets.get_mut(&AssetId::from_uuid(id)) {
                asset.amount += amount;
            }
        }
        (Collection::Liabilities, Delta::Money(amount)) => {
            if let Some(liability) = collections.liabilities.get_mut(&LiabilityId::from_uuid(id)) {
                liability.amount += amount;
            }
        }
        _ => {}
    }
}
