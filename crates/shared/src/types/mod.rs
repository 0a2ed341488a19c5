//! Shared type definitions.

pub mod id;

pub use id::{
    AssetId, CategoryId, CreditorId, CustomerId, DrawingId, EntryId, ExpenseId, LiabilityId,
    OwnerId, ProductId, PurchaseId, PurchaseReturnId, SaleId, SalesReturnId,
};
