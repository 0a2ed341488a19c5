//! Payment routes: money given to creditors, money received from customers.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use munim_core::ledger::LedgerKind;
use munim_core::party::{Creditor, Customer};
use munim_core::posting::PostingEvent;
use munim_db::PostingService;
use munim_shared::types::{CreditorId, CustomerId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;

/// Creates the payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments/given", post(payment_given))
        .route("/payments/received", post(payment_received))
}

fn default_ledger() -> LedgerKind {
    LedgerKind::Cash
}

/// Request body for paying a creditor.
#[derive(Debug, Deserialize)]
pub struct PaymentGivenRequest {
    /// Creditor being paid.
    pub creditor_id: CreditorId,
    /// Amount paid.
    pub amount: Decimal,
    /// Ledger the payment leaves from; defaults to cash.
    #[serde(default = "default_ledger")]
    pub source: LedgerKind,
}

/// Request body for receiving a customer payment.
#[derive(Debug, Deserialize)]
pub struct PaymentReceivedRequest {
    /// Customer paying.
    pub customer_id: CustomerId,
    /// Amount received.
    pub amount: Decimal,
    /// Ledger the money arrives in; defaults to cash.
    #[serde(default = "default_ledger")]
    pub source: LedgerKind,
}

/// POST `/payments/given` - Pay a creditor, reducing their due.
async fn payment_given(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<PaymentGivenRequest>,
) -> Result<Json<Creditor>, ApiError> {
    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::PaymentGiven {
            creditor: payload.creditor_id,
            amount: payload.amount,
            source: payload.source,
        },
    )?;
    Ok(Json(primary_document!(document, Creditor)))
}

/// POST `/payments/received` - Receive a customer payment, reducing their due.
async fn payment_received(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<PaymentReceivedRequest>,
) -> Result<Json<Customer>, ApiError> {
    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::PaymentReceived {
            customer: payload.customer_id,
            amount: payload.amount,
            target: payload.source,
        },
    )?;
    Ok(Json(primary_document!(document, Customer)))
}
