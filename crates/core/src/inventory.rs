//! Products and stock checks.

use munim_shared::types::{OwnerId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stocked product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Owning user.
    pub owner: OwnerId,
    /// Product name, unique per owner.
    pub product_name: String,
    /// Units currently in stock.
    pub number_in_stock: i64,
    /// Cost per piece.
    pub per_piece_cost: Decimal,
    /// Selling price per piece.
    pub per_piece_selling_price: Decimal,
}

impl Product {
    /// Creates a new product.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        product_name: impl Into<String>,
        number_in_stock: i64,
        per_piece_cost: Decimal,
        per_piece_selling_price: Decimal,
    ) -> Self {
        Self {
            id: ProductId::new(),
            owner,
            product_name: product_name.into(),
            number_in_stock,
            per_piece_cost,
            per_piece_selling_price,
        }
    }

    /// Whether the requested quantity can be taken from stock.
    #[must_use]
    pub fn has_sufficient_stock(&self, requested: i64) -> bool {
        requested <= self.number_in_stock
    }
}
