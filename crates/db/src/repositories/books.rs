//! Repository for posted business documents.
//!
//! Purchases, sales, returns, assets, liabilities, expenses, and drawings
//! are created by the posting engine and immutable afterwards, so this
//! repository only reads them. Expense categories keep the full CRUD they
//! had as standalone reference data.

use std::sync::Arc;

use munim_core::books::{
    Asset, Drawing, Expense, ExpenseCategory, Liability, PaymentMethod, Purchase, PurchaseReturn,
    Sale, SalesReturn,
};
use munim_shared::types::{CategoryId, OwnerId};

use crate::store::{Store, StoreError};

/// Read access to posted documents, plus expense category CRUD.
#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<Store>,
}

impl BooksRepository {
    /// Creates a new books repository.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Lists an owner's purchases, newest first.
    #[must_use]
    pub fn purchases(&self, owner: OwnerId) -> Vec<Purchase> {
        let mut purchases: Vec<_> = self
            .store
            .read()
            .purchases
            .values()
            .filter(|purchase| purchase.owner == owner)
            .cloned()
            .collect();
        purchases.sort_by(|a, b| b.date.cmp(&a.date));
        purchases
    }

    /// Lists an owner's credit purchases of one product.
    #[must_use]
    pub fn credit_purchases_for_product(&self, owner: OwnerId, product_name: &str) -> Vec<Purchase> {
        self.store
            .read()
            .purchases
            .values()
            .filter(|purchase| {
                purchase.owner == owner
                    && purchase.payment == PaymentMethod::Credit
                    && purchase.product_name == product_name
            })
            .cloned()
            .collect()
    }

    /// Lists an owner's sales, newest first.
    #[must_use]
    pub fn sales(&self, owner: OwnerId) -> Vec<Sale> {
        let mut sales: Vec<_> = self
            .store
            .read()
            .sales
            .values()
            .filter(|sale| sale.owner == owner)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.date.cmp(&a.date));
        sales
    }

    /// Lists an owner's credit sales containing one product.
    #[must_use]
    pub fn credit_sales_for_product(&self, owner: OwnerId, product_name: &str) -> Vec<Sale> {
        self.store
            .read()
            .sales
            .values()
            .filter(|sale| {
                sale.owner == owner
                    && sale.payment == PaymentMethod::Credit
                    && sale.lines.iter().any(|line| line.product_name == product_name)
            })
            .cloned()
            .collect()
    }

    /// Lists an owner's purchase returns, newest first.
    #[must_use]
    pub fn purchase_returns(&self, owner: OwnerId) -> Vec<PurchaseReturn> {
        let mut returns: Vec<_> = self
            .store
            .read()
            .purchase_returns
            .values()
            .filter(|purchase_return| purchase_return.owner == owner)
            .cloned()
            .collect();
        returns.sort_by(|a, b| b.date.cmp(&a.date));
        returns
    }

    /// Lists an owner's sales returns, newest first.
    #[must_use]
    pub fn sales_returns(&self, owner: OwnerId) -> Vec<SalesReturn> {
        let mut returns: Vec<_> = self
            .store
            .read()
            .sales_returns
            .values()
            .filter(|sales_return| sales_return.owner == owner)
            .cloned()
            .collect();
        returns.sort_by(|a, b| b.date.cmp(&a.date));
        returns
    }

    /// Lists an owner's assets, newest first.
    #[must_use]
    pub fn assets(&self, owner: OwnerId) -> Vec<Asset> {
        let mut assets: Vec<_> = self
            .store
            .read()
            .assets
            .values()
            .filter(|asset| asset.owner == owner)
            .cloned()
            .collect();
        assets.sort_by(|a, b| b.date.cmp(&a.date));
        assets
    }

    /// Lists an owner's liabilities, newest first.
    #[must_use]
    pub fn liabilities(&self, owner: OwnerId) -> Vec<Liability> {
        let mut liabilities: Vec<_> = self
            .store
            .read()
            .liabilities
            .values()
            .filter(|liability| liability.owner == owner)
            .cloned()
            .collect();
        liabilities.sort_by(|a, b| b.date.cmp(&a.date));
        liabilities
    }

    /// Lists an owner's expenses, newest first.
    #[must_use]
    pub fn expenses(&self, owner: OwnerId) -> Vec<Expense> {
        let mut expenses: Vec<_> = self
            .store
            .read()
            .expenses
            .values()
            .filter(|expense| expense.owner == owner)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    /// Lists an owner's drawings, newest first.
    #[must_use]
    pub fn drawings(&self, owner: OwnerId) -> Vec<Drawing> {
        let mut drawings: Vec<_> = self
            .store
            .read()
            .drawings
            .values()
            .filter(|drawing| drawing.owner == owner)
            .cloned()
            .collect();
        drawings.sort_by(|a, b| b.date.cmp(&a.date));
        drawings
    }

    // ========================================================================
    // Expense categories
    // ========================================================================

    /// Lists an owner's expense categories, sorted by name.
    #[must_use]
    pub fn categories(&self, owner: OwnerId) -> Vec<ExpenseCategory> {
        let mut categories: Vec<_> = self
            .store
            .read()
            .categories
            .values()
            .filter(|category| category.owner == owner)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    /// Fetches one category, checking ownership.
    pub fn category(&self, owner: OwnerId, id: CategoryId) -> Result<ExpenseCategory, StoreError> {
        let category = self
            .store
            .read()
            .categories
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("category"))?;
        if category.owner != owner {
            return Err(StoreError::NotOwned);
        }
        Ok(category)
    }

    /// Creates a category directly (outside of an expense posting).
    pub fn create_category(&self, owner: OwnerId, name: &str) -> ExpenseCategory {
        let category = ExpenseCategory::new(owner, name);
        self.store
            .write()
            .categories
            .insert(category.id, category.clone());
        category
    }

    /// Renames a category.
    pub fn rename_category(
        &self,
        owner: OwnerId,
        id: CategoryId,
        name: &str,
    ) -> Result<ExpenseCategory, StoreError> {
        let mut collections = self.store.write();
        let category = collections
            .categories
            .get_mut(&id)
            .ok_or(StoreError::NotFound("category"))?;
        if category.owner != owner {
            return Err(StoreError::NotOwned);
        }
        category.name = name.to_string();
        Ok(category.clone())
    }

    /// Deletes a category, checking ownership.
    pub fn delete_category(&self, owner: OwnerId, id: CategoryId) -> Result<(), StoreError> {
        let mut collections = self.store.write();
        let category = collections
            .categories
            .get(&id)
            .ok_or(StoreError::NotFound("category"))?;
        if category.owner != owner {
            return Err(StoreError::NotOwned);
        }
        collections.categories.remove(&id);
        Ok(())
    }
}
