//! Posting events.
//!
//! One variant per business event the engine can post. Events carry raw
//! caller inputs; every derived amount (totals, interest, net balances) is
//! computed by the engine.

use munim_shared::types::{
    AssetId, CategoryId, CreditorId, CustomerId, LiabilityId, ProductId, PurchaseId, SaleId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::books::PaymentMethod;
use crate::ledger::LedgerKind;

/// Where the money for a funding-capable event comes from.
///
/// Cash and bank draw on the matching ledger and require sufficiency; credit
/// raises the named creditor's due instead of touching a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "creditor")]
pub enum FundingSource {
    /// Pay from the cash ledger.
    Cash,
    /// Pay from the bank ledger.
    Bank,
    /// Buy on credit from the given creditor.
    Credit(CreditorId),
}

/// A funding source resolved into its two executable shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFunding {
    /// Draws on a ledger and requires sufficiency there.
    Ledger(LedgerKind),
    /// Raises the creditor's due instead of touching a ledger.
    Credit(CreditorId),
}

impl FundingSource {
    /// The ledger this source draws on, if any.
    #[must_use]
    pub const fn ledger_kind(self) -> Option<LedgerKind> {
        match self {
            Self::Cash => Some(LedgerKind::Cash),
            Self::Bank => Some(LedgerKind::Bank),
            Self::Credit(_) => None,
        }
    }

    /// Splits the source into its ledger-backed or credit shape.
    #[must_use]
    pub const fn resolved(self) -> ResolvedFunding {
        match self {
            Self::Cash => ResolvedFunding::Ledger(LedgerKind::Cash),
            Self::Bank => ResolvedFunding::Ledger(LedgerKind::Bank),
            Self::Credit(creditor) => ResolvedFunding::Credit(creditor),
        }
    }

    /// The payment method recorded on the resulting document.
    #[must_use]
    pub const fn method(self) -> PaymentMethod {
        match self {
            Self::Cash => PaymentMethod::Cash,
            Self::Bank => PaymentMethod::Bank,
            Self::Credit(_) => PaymentMethod::Credit,
        }
    }
}

impl From<LedgerKind> for FundingSource {
    fn from(kind: LedgerKind) -> Self {
        match kind {
            LedgerKind::Cash => Self::Cash,
            LedgerKind::Bank => Self::Bank,
        }
    }
}

/// The product a purchase applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductTarget {
    /// First purchase of a product not yet in inventory.
    New {
        /// Name for the new product.
        name: String,
    },
    /// Restock of an existing product.
    Existing(ProductId),
}

/// The category an expense is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryTarget {
    /// A category created on the fly.
    New {
        /// Name for the new category.
        name: String,
    },
    /// An existing category.
    Existing(CategoryId),
}

/// What a settlement pays down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettleTarget {
    /// Pay down an asset's outstanding amount.
    Asset(AssetId),
    /// Pay down a liability.
    Liability(LiabilityId),
}

/// One requested line of a sale or stock drawing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineInput {
    /// Product to take from stock.
    pub product_id: ProductId,
    /// Units requested.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// A business event to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingEvent {
    /// Acquire a new asset, funded by cash, bank, or a creditor.
    AcquireAsset {
        /// Asset name, unique per owner.
        name: String,
        /// Principal amount.
        amount: Decimal,
        /// Extras, defaulting to zero.
        other_expenses: Option<Decimal>,
        /// Funding source.
        source: FundingSource,
    },

    /// Put more money into an existing asset.
    ExtendAsset {
        /// Asset to extend.
        asset: AssetId,
        /// Additional amount.
        amount: Decimal,
        /// Extras, defaulting to zero.
        other_expenses: Option<Decimal>,
        /// Funding source.
        source: FundingSource,
    },

    /// Record a loan draw-down.
    DrawDownLiability {
        /// Liability name.
        name: String,
        /// Principal received.
        principal: Decimal,
        /// Annual interest rate in percent.
        interest_rate: Decimal,
        /// Term in months.
        term_months: i64,
        /// Extras, defaulting to zero.
        other_expenses: Option<Decimal>,
        /// Ledger the money arrives in.
        source: LedgerKind,
    },

    /// Partially settle an asset or liability.
    Settle {
        /// What to pay down.
        target: SettleTarget,
        /// Settlement amount.
        amount: Decimal,
        /// Ledger the payment leaves from.
        source: LedgerKind,
    },

    /// Buy stock: a new product or a restock.
    Purchase {
        /// New product or existing one.
        target: ProductTarget,
        /// Units bought.
        quantity: i64,
        /// Cost per piece.
        per_piece_cost: Decimal,
        /// Selling price per piece.
        per_piece_selling_price: Decimal,
        /// Extras, defaulting to zero.
        other_expenses: Option<Decimal>,
        /// Funding source.
        source: FundingSource,
    },

    /// Sell one or more products.
    Sale {
        /// Sold lines.
        lines: Vec<SaleLineInput>,
        /// Customer to freeze into the document, when named.
        customer: Option<CustomerId>,
        /// How the sale was paid.
        payment: PaymentMethod,
        /// Extras, defaulting to zero.
        other_expenses: Option<Decimal>,
    },

    /// Return units against a purchase.
    ReturnPurchase {
        /// The originating purchase.
        purchase: PurchaseId,
        /// Product being returned.
        product: ProductId,
        /// Units returned.
        quantity: i64,
        /// Refund per piece.
        per_piece_cost: Decimal,
    },

    /// Return units against a sale.
    ReturnSale {
        /// The originating sale.
        sale: SaleId,
        /// Product being returned.
        product: ProductId,
        /// Units returned.
        quantity: i64,
        /// Refund per unit.
        unit_price: Decimal,
    },

    /// Pay a creditor, reducing their due.
    PaymentGiven {
        /// Creditor being paid.
        creditor: CreditorId,
        /// Amount paid.
        amount: Decimal,
        /// Ledger the payment leaves from.
        source: LedgerKind,
    },

    /// Receive a payment from a customer, reducing their due.
    PaymentReceived {
        /// Customer paying.
        customer: CustomerId,
        /// Amount received.
        amount: Decimal,
        /// Ledger the money arrives in.
        target: LedgerKind,
    },

    /// Record a business expense.
    Expense {
        /// What the money was spent on.
        name: String,
        /// Amount spent.
        amount: Decimal,
        /// Category to file under, when any.
        category: Option<CategoryTarget>,
        /// Ledger the payment leaves from.
        source: LedgerKind,
    },

    /// Owner draws cash out of the business.
    DrawCash {
        /// Amount withdrawn.
        amount: Decimal,
    },

    /// Owner draws stock out of the business.
    DrawStock {
        /// Withdrawn lines, valued at their stated prices.
        lines: Vec<SaleLineInput>,
    },
}

impl PostingEvent {
    /// Short event name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AcquireAsset { .. } => "acquire_asset",
            Self::ExtendAsset { .. } => "extend_asset",
            Self::DrawDownLiability { .. } => "draw_down_liability",
            Self::Settle { .. } => "settle",
            Self::Purchase { .. } => "purchase",
            Self::Sale { .. } => "sale",
            Self::ReturnPurchase { .. } => "return_purchase",
            Self::ReturnSale { .. } => "return_sale",
            Self::PaymentGiven { .. } => "payment_given",
            Self::PaymentReceived { .. } => "payment_received",
            Self::Expense { .. } => "expense",
            Self::DrawCash { .. } => "draw_cash",
            Self::DrawStock { .. } => "draw_stock",
        }
    }
}
