//! API route definitions.

use axum::Router;
use munim_core::books::PaymentMethod;
use munim_core::posting::FundingSource;
use munim_shared::types::CreditorId;

use crate::AppState;
use crate::error::ApiError;

pub mod assets;
pub mod bank;
pub mod cash;
pub mod creditors;
pub mod customers;
pub mod drawings;
pub mod expense_categories;
pub mod expenses;
pub mod health;
pub mod liabilities;
pub mod payments;
pub mod products;
pub mod purchase_returns;
pub mod purchases;
pub mod sales;
pub mod sales_returns;


/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(cash::routes())
        .merge(bank::routes())
        .merge(products::routes())
        .merge(creditors::routes())
        .merge(customers::routes())
        .merge(purchases::routes())
        .merge(sales::routes())
        .merge(purchase_returns::routes())
        .merge(sales_returns::routes())
        .merge(assets::routes())
        .merge(liabilities::routes())
        .merge(expenses::routes())
        .merge(expense_categories::routes())
        .merge(drawings::routes())
        .merge(payments::routes())
}

/// Resolves a payment method plus optional creditor into a funding source.
pub(crate) fn funding_source(
    payment: PaymentMethod,
    creditor_id: Option<CreditorId>,
) -> Result<FundingSource, ApiError> {
    match payment {
        PaymentMethod::Cash => Ok(FundingSource::Cash),
        PaymentMethod::Bank => Ok(FundingSource::Bank),
        PaymentMethod::Credit => creditor_id
            .map(FundingSource::Credit)
            .ok_or_else(|| ApiError::validation("creditor_id is required for credit payment")),
    }
}

/// Unwraps the posting service's primary document into the expected variant.
macro_rules! primary_document {
    ($document:expr, $variant:ident) => {
        match $document {
            munim_core::posting::Document::$variant(inner) => inner,
            other => {
                return Err(crate::error::ApiError::internal(format!(
                    "unexpected primary document: {:?}",
                    other.collection()
                )));
            }
        }
    };
}
pub(crate) use primary_document;
