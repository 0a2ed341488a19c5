//! Posting error types.
//!
//! Business-rule violations are expected, recoverable-by-caller conditions:
//! they come back as structured variants, never as panics, and always before
//! any write is attempted. Transport status mapping lives in the API layer,
//! not here.

use munim_shared::types::{
    AssetId, CategoryId, CreditorId, CustomerId, LiabilityId, ProductId, PurchaseId, SaleId,
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::LedgerKind;

/// Errors produced by the posting engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostingError {
    // ========== Validation Errors ==========
    /// A required field is missing, empty, or out of range.
    #[error("{0}")]
    Validation(String),

    // ========== Reference Errors ==========
    /// Referenced product does not exist.
    #[error("Invalid product: {0}")]
    ProductNotFound(ProductId),

    /// Referenced creditor does not exist.
    #[error("Invalid creditor: {0}")]
    CreditorNotFound(CreditorId),

    /// Referenced customer does not exist.
    #[error("Invalid customer: {0}")]
    CustomerNotFound(CustomerId),

    /// Referenced purchase does not exist.
    #[error("Invalid purchase: {0}")]
    PurchaseNotFound(PurchaseId),

    /// Referenced sale does not exist.
    #[error("Invalid sale: {0}")]
    SaleNotFound(SaleId),

    /// Referenced asset does not exist.
    #[error("Invalid asset: {0}")]
    AssetNotFound(AssetId),

    /// Referenced liability does not exist.
    #[error("Invalid liability: {0}")]
    LiabilityNotFound(LiabilityId),

    /// Referenced expense category does not exist.
    #[error("Invalid expense category: {0}")]
    CategoryNotFound(CategoryId),

    /// Referenced entity exists but belongs to a different owner.
    #[error("Not authorized")]
    NotOwned,

    // ========== Business Rule Errors ==========
    /// Requested amount exceeds the net balance of the funding source.
    #[error("Enough {source} is not available: need {needed}, have {available}")]
    InsufficientFunds {
        /// The funding source that came up short.
        source: LedgerKind,
        /// Amount the posting needs.
        needed: Decimal,
        /// Net balance actually available.
        available: Decimal,
    },

    /// Requested quantity exceeds the product's stock.
    #[error("Enough stock is not available: requested {requested}, in stock {in_stock}")]
    InsufficientStock {
        /// The product that came up short.
        product: ProductId,
        /// Units requested.
        requested: i64,
        /// Units in stock.
        in_stock: i64,
    },

    /// Return quantity exceeds the remaining returnable quantity.
    #[error("Cannot return more than the original: requested {requested}, returnable {returnable}")]
    ExceedsOriginal {
        /// Units requested for return.
        requested: i64,
        /// Units still returnable.
        returnable: i64,
    },

    /// Settlement amount exceeds the outstanding balance.
    #[error("Amount can't be greater than the outstanding balance: requested {requested}, outstanding {outstanding}")]
    AmountExceedsBalance {
        /// Amount offered for settlement.
        requested: Decimal,
        /// Outstanding balance.
        outstanding: Decimal,
    },

    /// A new-product purchase names a product that already exists.
    #[error("Product already exists: {0}")]
    DuplicateProduct(String),

    /// A new asset names an asset that already exists.
    #[error("Asset already exists: {0}")]
    DuplicateAsset(String),
}

impl PostingError {
    /// Machine-checkable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::CreditorNotFound(_) => "CREDITOR_NOT_FOUND",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::PurchaseNotFound(_) => "PURCHASE_NOT_FOUND",
            Self::SaleNotFound(_) => "SALE_NOT_FOUND",
            Self::AssetNotFound(_) => "ASSET_NOT_FOUND",
            Self::LiabilityNotFound(_) => "LIABILITY_NOT_FOUND",
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::NotOwned => "NOT_OWNED",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::ExceedsOriginal { .. } => "EXCEEDS_ORIGINAL",
            Self::AmountExceedsBalance { .. } => "AMOUNT_EXCEEDS_BALANCE",
            Self::DuplicateProduct(_) => "DUPLICATE_PRODUCT",
            Self::DuplicateAsset(_) => "DUPLICATE_ASSET",
        }
    }

    /// True for not-found reference errors.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProductNotFound(_)
                | Self::CreditorNotFound(_)
                | Self::CustomerNotFound(_)
                | Self::PurchaseNotFound(_)
                | Self::SaleNotFound(_)
                | Self::AssetNotFound(_)
                | Self::LiabilityNotFound(_)
                | Self::CategoryNotFound(_)
        )
    }
}
