//! Purchases, sales, and their returns.

use chrono::{DateTime, Utc};
use munim_shared::types::{OwnerId, ProductId, PurchaseId, PurchaseReturnId, SaleId, SalesReturnId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::party::{CreditorSnapshot, CustomerSnapshot};

/// How a trade document was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Paid from the cash ledger.
    Cash,
    /// Paid from the bank ledger.
    Bank,
    /// Bought or sold on credit.
    Credit,
}

/// A stock purchase, single product per document.
///
/// `total_cost` is computed by the engine as
/// `quantity * per_piece_cost + other_expenses`, never trusted from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    /// Purchase ID.
    pub id: PurchaseId,
    /// Owning user.
    pub owner: OwnerId,
    /// Product bought.
    pub product_name: String,
    /// How the purchase was funded.
    pub payment: PaymentMethod,
    /// Creditor frozen at purchase time, for credit purchases.
    pub creditor: Option<CreditorSnapshot>,
    /// Units bought.
    pub quantity: i64,
    /// Cost per piece.
    pub per_piece_cost: Decimal,
    /// Intended selling price per piece.
    pub per_piece_selling_price: Decimal,
    /// Transport and similar extras.
    pub other_expenses: Decimal,
    /// Computed total.
    pub total_cost: Decimal,
    /// Purchase date.
    pub date: DateTime<Utc>,
}

/// One line of a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    /// Product sold.
    pub product_id: ProductId,
    /// Product name frozen at sale time.
    pub product_name: String,
    /// Units sold.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
}

impl SaleLine {
    /// Line total.
    #[must_use]
    pub fn total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// A sale, one or more lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Sale ID.
    pub id: SaleId,
    /// Owning user.
    pub owner: OwnerId,
    /// How the sale was paid.
    pub payment: PaymentMethod,
    /// Customer frozen at sale time, when one was named.
    pub customer: Option<CustomerSnapshot>,
    /// Sold lines.
    pub lines: Vec<SaleLine>,
    /// Extras added to the total.
    pub other_expenses: Decimal,
    /// Computed total.
    pub total_amount: Decimal,
    /// Sale date.
    pub date: DateTime<Utc>,
}

impl Sale {
    /// Units of the given product sold across all lines.
    #[must_use]
    pub fn quantity_of(&self, product: ProductId) -> i64 {
        self.lines
            .iter()
            .filter(|line| line.product_id == product)
            .map(|line| line.quantity)
            .sum()
    }
}

/// A return against a purchase.
///
/// Embeds the full originating purchase as an immutable snapshot; the
/// cumulative returned quantity is bounded by the original quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseReturn {
    /// Return ID.
    pub id: PurchaseReturnId,
    /// Owning user.
    pub owner: OwnerId,
    /// The originating purchase, frozen.
    pub purchase: Purchase,
    /// Units returned.
    pub quantity: i64,
    /// Refund per piece.
    pub per_piece_cost: Decimal,
    /// Computed refund total.
    pub total_amount: Decimal,
    /// Return date.
    pub date: DateTime<Utc>,
}

/// A return against a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReturn {
    /// Return ID.
    pub id: SalesReturnId,
    /// Owning user.
    pub owner: OwnerId,
    /// The originating sale, frozen.
    pub sale: Sale,
    /// Product being returned.
    pub product_id: ProductId,
    /// Units returned.
    pub quantity: i64,
    /// Refund per unit.
    pub unit_price: Decimal,
    /// Computed refund total.
    pub total_amount: Decimal,
    /// Return date.
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sale_sums_quantity_per_product() {
        let product = ProductId::new();
        let other = ProductId::new();
        let sale = Sale {
            id: SaleId::new(),
            owner: OwnerId::new(),
            payment: PaymentMethod::Cash,
            customer: None,
            lines: vec![
                SaleLine {
                    product_id: product,
                    product_name: "soap".into(),
                    quantity: 3,
                    unit_price: dec!(14),
                },
                SaleLine {
                    product_id: other,
                    product_name: "oil".into(),
                    quantity: 2,
                    unit_price: dec!(90),
                },
                SaleLine {
                    product_id: product,
                    product_name: "soap".into(),
                    quantity: 1,
                    unit_price: dec!(14),
                },
            ],
            other_expenses: Decimal::ZERO,
            total_amount: dec!(236),
            date: Utc::now(),
        };
        assert_eq!(sale.quantity_of(product), 4);
        assert_eq!(sale.quantity_of(other), 2);
        assert_eq!(sale.quantity_of(ProductId::new()), 0);
    }

    #[test]
    fn line_total() {
        let line = SaleLine {
            product_id: ProductId::new(),
            product_name: "soap".into(),
            quantity: 5,
            unit_price: dec!(14.50),
        };
        assert_eq!(line.total(), dec!(72.50));
    }
}
