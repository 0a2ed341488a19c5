//! Shared types and configuration for Munim.
//!
//! This crate holds the pieces every other crate needs: typed entity IDs
//! and application configuration. No business logic lives here.

pub mod config;
pub mod types;

pub use config::{AppConfig, ServerConfig};
pub use types::{
    AssetId, CategoryId, CreditorId, CustomerId, DrawingId, EntryId, ExpenseId, LiabilityId,
    OwnerId, ProductId, PurchaseId, PurchaseReturnId, SaleId, SalesReturnId,
};
