//! Write plans.
//!
//! A write plan is the ordered set of document inserts and updates that make
//! up one atomic posting. The engine only builds plans; executing one
//! all-or-nothing is the atomic writer's contract. Op order inside a plan is
//! not semantically significant but is preserved for debuggability.

use munim_shared::types::{
    AssetId, CreditorId, CustomerId, LiabilityId, ProductId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::books::{Asset, Drawing, Expense, ExpenseCategory, Liability, Purchase, PurchaseReturn, Sale, SalesReturn};
use crate::inventory::Product;
use crate::ledger::LedgerEntry;
use crate::party::{Creditor, Customer};

/// The collection a write op targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Cash and bank ledger entries.
    Entries,
    /// Products.
    Products,
    /// Creditors.
    Creditors,
    /// Customers.
    Customers,
    /// Purchases.
    Purchases,
    /// Sales.
    Sales,
    /// Purchase returns.
    PurchaseReturns,
    /// Sales returns.
    SalesReturns,
    /// Assets.
    Assets,
    /// Liabilities.
    Liabilities,
    /// Expenses.
    Expenses,
    /// Expense categories.
    ExpenseCategories,
    /// Owner drawings.
    Drawings,
}

/// A document to be inserted by a write op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Document {
    /// A cash or bank ledger entry.
    LedgerEntry(LedgerEntry),
    /// A product.
    Product(Product),
    /// A creditor.
    Creditor(Creditor),
    /// A customer.
    Customer(Customer),
    /// A purchase.
    Purchase(Purchase),
    /// A sale.
    Sale(Sale),
    /// A purchase return.
    PurchaseReturn(PurchaseReturn),
    /// A sales return.
    SalesReturn(SalesReturn),
    /// An asset.
    Asset(Asset),
    /// A liability.
    Liability(Liability),
    /// An expense.
    Expense(Expense),
    /// An expense category.
    ExpenseCategory(ExpenseCategory),
    /// An owner drawing.
    Drawing(Drawing),
}

impl Document {
    /// The collection this document belongs to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::LedgerEntry(_) => Collection::Entries,
            Self::Product(_) => Collection::Products,
            Self::Creditor(_) => Collection::Creditors,
            Self::Customer(_) => Collection::Customers,
            Self::Purchase(_) => Collection::Purchases,
            Self::Sale(_) => Collection::Sales,
            Self::PurchaseReturn(_) => Collection::PurchaseReturns,
            Self::SalesReturn(_) => Collection::SalesReturns,
            Self::Asset(_) => Collection::Assets,
            Self::Liability(_) => Collection::Liabilities,
            Self::Expense(_) => Collection::Expenses,
            Self::ExpenseCategory(_) => Collection::ExpenseCategories,
            Self::Drawing(_) => Collection::Drawings,
        }
    }
}

/// The increment applied by an update op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delta {
    /// A signed money increment (dues, outstanding amounts).
    Money(Decimal),
    /// A signed unit increment (stock levels).
    Quantity(i64),
}

/// One write operation inside a plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WriteOp {
    /// Insert a new document.
    Insert(Document),
    /// Increment a document's running field by a delta.
    AdjustById {
        /// Target collection.
        collection: Collection,
        /// Target document ID.
        id: Uuid,
        /// Signed increment.
        delta: Delta,
    },
}

/// The ordered write set for one atomic posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WritePlan {
    ops: Vec<WriteOp>,
}

impl WritePlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an insert op.
    pub fn insert(&mut self, document: Document) -> &mut Self {
        self.ops.push(WriteOp::Insert(document));
        self
    }

    /// Appends a stock adjustment.
    pub fn adjust_stock(&mut self, product: ProductId, delta: i64) -> &mut Self {
        self.ops.push(WriteOp::AdjustById {
            collection: Collection::Products,
            id: product.into_inner(),
            delta: Delta::Quantity(delta),
        });
        self
    }

    /// Appends a creditor due adjustment.
    pub fn adjust_creditor_due(&mut self, creditor: CreditorId, delta: Decimal) -> &mut Self {
        self.ops.push(WriteOp::AdjustById {
            collection: Collection::Creditors,
            id: creditor.into_inner(),
            delta: Delta::Money(delta),
        });
        self
    }

    /// Appends a customer due adjustment.
    pub fn adjust_customer_due(&mut self, customer: CustomerId, delta: Decimal) -> &mut Self {
        self.ops.push(WriteOp::AdjustById {
            collection: Collection::Customers,
            id: customer.into_inner(),
            delta: Delta::Money(delta),
        });
        self
    }

    /// Appends an asset amount adjustment.
    pub fn adjust_asset_amount(&mut self, asset: AssetId, delta: Decimal) -> &mut Self {
        self.ops.push(WriteOp::AdjustById {
            collection: Collection::Assets,
            id: asset.into_inner(),
            delta: Delta::Money(delta),
        });
        self
    }

    /// Appends a liability amount adjustment.
    pub fn adjust_liability_amount(&mut self, liability: LiabilityId, delta: Decimal) -> &mut Self {
        self.ops.push(WriteOp::AdjustById {
            collection: Collection::Liabilities,
            id: liability.into_inner(),
            delta: Delta::Money(delta),
        });
        self
    }

    /// The ops, in plan order.
    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Consumes the plan into its ops.
    #[must_use]
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }

    /// Number of ops in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True when the plan has no ops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
