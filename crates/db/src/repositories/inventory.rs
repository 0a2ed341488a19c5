//! Product repository.

use std::sync::Arc;

use munim_core::inventory::Product;
use munim_shared::types::{OwnerId, ProductId};
use rust_decimal::Decimal;

use crate::store::{Store, StoreError};

/// Field mask for product updates; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    /// New name.
    pub product_name: Option<String>,
    /// New stock level.
    pub number_in_stock: Option<i64>,
    /// New cost per piece.
    pub per_piece_cost: Option<Decimal>,
    /// New selling price per piece.
    pub per_piece_selling_price: Option<Decimal>,
}

/// Repository for products.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<Store>,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Lists an owner's products, sorted by name.
    #[must_use]
    pub fn list(&self, owner: OwnerId) -> Vec<Product> {
        let mut products: Vec<_> = self
            .store
            .read()
            .products
            .values()
            .filter(|product| product.owner == owner)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.product_name.cmp(&b.product_name));
        products
    }

    /// Fetches one product, checking ownership.
    pub fn get(&self, owner: OwnerId, id: ProductId) -> Result<Product, StoreError> {
        let product = self
            .store
            .read()
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("product"))?;
        if product.owner != owner {
            return Err(StoreError::NotOwned);
        }
        Ok(product)
    }

    /// Creates a product directly (outside of a purchase).
    pub fn create(
        &self,
        owner: OwnerId,
        product_name: &str,
        number_in_stock: i64,
        per_piece_cost: Decimal,
        per_piece_selling_price: Decimal,
    ) -> Product {
        let product = Product::new(
            owner,
            product_name,
            number_in_stock,
            per_piece_cost,
            per_piece_selling_price,
        );
        self.store
            .write()
            .products
            .insert(product.id, product.clone());
        product
    }

    /// Applies a field-mask update.
    pub fn update(
        &self,
        owner: OwnerId,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, StoreError> {
        let mut collections = self.store.write();
        let product = collections
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound("product"))?;
        if product.owner != owner {
            return Err(StoreError::NotOwned);
        }

        if let Some(name) = update.product_name {
            product.product_name = name;
        }
        if let Some(stock) = update.number_in_stock {
            product.number_in_stock = stock;
        }
        if let Some(cost) = update.per_piece_cost {
            product.per_piece_cost = cost;
        }
        if let Some(price) = update.per_piece_selling_price {
            product.per_piece_selling_price = price;
        }
        Ok(product.clone())
    }

    /// Deletes a product, checking ownership.
    pub fn delete(&self, owner: OwnerId, id: ProductId) -> Result<(), StoreError> {
        let mut collections = self.store.write();
        let product = collections
            .products
            .get(&id)
            .ok_or(StoreError::NotFound("product"))?;
        if product.owner != owner {
            return Err(StoreError::NotOwned);
        }
        collections.products.remove(&id);
        Ok(())
    }
}
