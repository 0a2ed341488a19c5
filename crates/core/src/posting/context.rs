//! The read seam between the posting engine and storage.

use munim_shared::types::{
    AssetId, CategoryId, CreditorId, CustomerId, LiabilityId, ProductId, PurchaseId, SaleId,
};
use rust_decimal::Decimal;

use crate::books::{Asset, ExpenseCategory, Liability, Purchase, Sale};
use crate::inventory::Product;
use crate::ledger::LedgerKind;
use crate::party::{Creditor, Customer};

/// Read-only view of the data a posting may need to validate against.
///
/// Implementations are built per request. By-id lookups resolve across
/// owners so the engine can distinguish a missing reference from a foreign
/// one; by-name lookups and aggregates are scoped to the posting owner.
pub trait PostingContext {
    /// Net balance of the owner's cash or bank ledger.
    fn net_balance(&self, kind: LedgerKind) -> Decimal;

    /// Product by id.
    fn product(&self, id: ProductId) -> Option<Product>;

    /// The owner's product with the given name, if any.
    fn product_by_name(&self, name: &str) -> Option<Product>;

    /// Creditor by id.
    fn creditor(&self, id: CreditorId) -> Option<Creditor>;

    /// Customer by id.
    fn customer(&self, id: CustomerId) -> Option<Customer>;

    /// Purchase by id.
    fn purchase(&self, id: PurchaseId) -> Option<Purchase>;

    /// Sale by id.
    fn sale(&self, id: SaleId) -> Option<Sale>;

    /// Asset by id.
    fn asset(&self, id: AssetId) -> Option<Asset>;

    /// The owner's asset with the given name, if any.
    fn asset_by_name(&self, name: &str) -> Option<Asset>;

    /// Liability by id.
    fn liability(&self, id: LiabilityId) -> Option<Liability>;

    /// Expense category by id.
    fn category(&self, id: CategoryId) -> Option<ExpenseCategory>;

    /// The owner's expense category with the given name, if any.
    fn category_by_name(&self, name: &str) -> Option<ExpenseCategory>;

    /// Units already returned against the given purchase.
    fn quantity_returned_for_purchase(&self, id: PurchaseId) -> i64;

    /// Units of one product already returned against the given sale.
    fn quantity_returned_for_sale(&self, id: SaleId, product: ProductId) -> i64;
}
