//! Creditor and customer repositories.

use std::sync::Arc;

use munim_core::party::{Creditor, Customer};
use munim_shared::types::{CreditorId, CustomerId, OwnerId};
use rust_decimal::Decimal;

use crate::store::{Store, StoreError};

/// Field mask for creditor updates.
#[derive(Debug, Clone, Default)]
pub struct CreditorUpdate {
    /// New name.
    pub name: Option<String>,
    /// New contact.
    pub contact: Option<String>,
    /// New due balance.
    pub due: Option<Decimal>,
}

/// Field mask for customer updates.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    /// New name.
    pub name: Option<String>,
    /// New mobile number.
    pub mobile: Option<String>,
    /// New due balance.
    pub due: Option<Decimal>,
}

/// Repository for creditors.
#[derive(Clone)]
pub struct CreditorRepository {
    store: Arc<Store>,
}

impl CreditorRepository {
    /// Creates a new creditor repository.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Lists an owner's creditors, sorted by name.
    #[must_use]
    pub fn list(&self, owner: OwnerId) -> Vec<Creditor> {
        let mut creditors: Vec<_> = self
            .store
            .read()
            .creditors
            .values()
            .filter(|creditor| creditor.owner == owner)
            .cloned()
            .collect();
        creditors.sort_by(|a, b| a.name.cmp(&b.name));
        creditors
    }

    /// Fetches one creditor, checking ownership.
    pub fn get(&self, owner: OwnerId, id: CreditorId) -> Result<Creditor, StoreError> {
        let creditor = self
            .store
            .read()
            .creditors
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("creditor"))?;
        if creditor.owner != owner {
            return Err(StoreError::NotOwned);
        }
        Ok(creditor)
    }

    /// Creates a creditor.
    pub fn create(
        &self,
        owner: OwnerId,
        name: &str,
        contact: &str,
        due: Option<Decimal>,
    ) -> Creditor {
        let creditor = Creditor::new(owner, name, contact, due);
        self.store
            .write()
            .creditors
            .insert(creditor.id, creditor.clone());
        creditor
    }

    /// Applies a field-mask update.
    pub fn update(
        &self,
        owner: OwnerId,
        id: CreditorId,
        update: CreditorUpdate,
    ) -> Result<Creditor, StoreError> {
        let mut collections = self.store.write();
        let creditor = collections
            .creditors
            .get_mut(&id)
            .ok_or(StoreError::NotFound("creditor"))?;
        if creditor.owner != owner {
            return Err(StoreError::NotOwned);
        }

        if let Some(name) = update.name {
            creditor.name = name;
        }
        if let Some(contact) = update.contact {
            creditor.contact = contact;
        }
        if let Some(due) = update.due {
            creditor.due = due;
        }
        Ok(creditor.clone())
    }

    /// Deletes a creditor, checking ownership.
    pub fn delete(&self, owner: OwnerId, id: CreditorId) -> Result<(), StoreError> {
        let mut collections = self.store.write();
        let creditor = collections
            .creditors
            .get(&id)
            .ok_or(StoreError::NotFound("creditor"))?;
        if creditor.owner != owner {
            return Err(StoreError::NotOwned);
        }
        collections.creditors.remove(&id);
        Ok(())
    }
}

/// Repository for customers.
#[derive(Clone)]
pub struct CustomerRepository {
    store: Arc<Store>,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Lists an owner's customers, sorted by name.
    #[must_use]
    pub fn list(&self, owner: OwnerId) -> Vec<Customer> {
        let mut customers: Vec<_> = self
            .store
            .read()
            .customers
            .values()
            .filter(|customer| customer.owner == owner)
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        customers
    }

    /// Fetches one customer, checking ownership.
    pub fn get(&self, owner: OwnerId, id: CustomerId) -> Result<Customer, StoreError> {
        let customer = self
            .store
            .read()
            .customers
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound("customer"))?;
        if customer.owner != owner {
            return Err(StoreError::NotOwned);
        }
        Ok(customer)
    }

    /// Creates a customer.
    pub fn create(
        &self,
        owner: OwnerId,
        name: &str,
        mobile: &str,
        due: Option<Decimal>,
    ) -> Customer {
        let customer = Customer::new(owner, name, mobile, due);
        self.store
            .write()
            .customers
            .insert(customer.id, customer.clone());
        customer
    }

    /// Applies a field-mask update.
    pub fn update(
        &self,
        owner: OwnerId,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, StoreError> {
        let mut collections = self.store.write();
        let customer = collections
            .customers
            .get_mut(&id)
            .ok_or(StoreError::NotFound("customer"))?;
        if customer.owner != owner {
            return Err(StoreError::NotOwned);
        }

        if let Some(name) = update.name {
            customer.name = name;
        }
        if let Some(mobile) = update.mobile {
            customer.mobile = mobile;
        }
        if let Some(due) = update.due {
            customer.due = due;
        }
        Ok(customer.clone())
    }

    /// Deletes a customer, checking ownership.
    pub fn delete(&self, owner: OwnerId, id: CustomerId) -> Result<(), StoreError> {
        let mut collections = self.store.write();
        let customer = collections
            .customers
            .get(&id)
            .ok_or(StoreError::NotFound("customer"))?;
        if customer.owner != owner {
            return Err(StoreError::NotOwned);
        }
        collections.customers.remove(&id);
        Ok(())
    }
}
