//! Creditors, customers, and their embedded snapshots.
//!
//! A creditor's `due` is the running balance owed **to** them; a customer's
//! `due` is the running balance owed **by** them. Business documents embed a
//! snapshot of the party at creation time and never re-derive it by
//! reference, so edits to the party do not rewrite history.

use munim_shared::types::{CreditorId, CustomerId, OwnerId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A supplier the business can buy from on credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creditor {
    /// Creditor ID.
    pub id: CreditorId,
    /// Owning user.
    pub owner: OwnerId,
    /// Name.
    pub name: String,
    /// Contact number.
    pub contact: String,
    /// Running balance owed to this creditor.
    pub due: Decimal,
}

impl Creditor {
    /// Creates a new creditor with an optional opening due.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        contact: impl Into<String>,
        due: Option<Decimal>,
    ) -> Self {
        Self {
            id: CreditorId::new(),
            owner,
            name: name.into(),
            contact: contact.into(),
            due: due.unwrap_or(Decimal::ZERO),
        }
    }
}

/// A customer the business sells to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: CustomerId,
    /// Owning user.
    pub owner: OwnerId,
    /// Name.
    pub name: String,
    /// Mobile number.
    pub mobile: String,
    /// Running balance owed by this customer.
    pub due: Decimal,
}

impl Customer {
    /// Creates a new customer with an optional opening due.
    #[must_use]
    pub fn new(
        owner: OwnerId,
        name: impl Into<String>,
        mobile: impl Into<String>,
        due: Option<Decimal>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            owner,
            name: name.into(),
            mobile: mobile.into(),
            due: due.unwrap_or(Decimal::ZERO),
        }
    }
}

/// Creditor details frozen into a document at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditorSnapshot {
    /// Creditor ID at snapshot time.
    pub id: CreditorId,
    /// Name at snapshot time.
    pub name: String,
    /// Contact at snapshot time.
    pub contact: String,
}

impl From<&Creditor> for CreditorSnapshot {
    fn from(creditor: &Creditor) -> Self {
        Self {
            id: creditor.id,
            name: creditor.name.clone(),
            contact: creditor.contact.clone(),
        }
    }
}

/// Customer details frozen into a document at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    /// Customer ID at snapshot time.
    pub id: CustomerId,
    /// Name at snapshot time.
    pub name: String,
    /// Mobile at snapshot time.
    pub mobile: String,
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            mobile: customer.mobile.clone(),
        }
    }
}
