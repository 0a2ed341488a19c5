//! Liability routes.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::Liability;
use munim_core::ledger::LedgerKind;
use munim_core::posting::{PostingEvent, SettleTarget};
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::LiabilityId;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;

/// Creates the liability routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/liabilities", get(list_liabilities))
        .route("/liabilities", post(draw_down))
        .route("/liabilities/{id}", post(settle))
}

/// Request body for recording a loan draw-down.
#[derive(Debug, Deserialize, Validate)]
pub struct DrawDownRequest {
    /// Liability name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Principal received.
    pub amount: Decimal,
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    /// Term in months.
    pub time: i64,
    /// Extras, defaulting to zero.
    pub other_expenses: Option<Decimal>,
    /// Ledger the money arrives in.
    pub source: LedgerKind,
}

/// Request body for a repayment.
#[derive(Debug, Deserialize)]
pub struct RepaymentRequest {
    /// Repayment amount.
    pub amount: Decimal,
    /// Ledger the payment leaves from.
    pub payment: LedgerKind,
}

/// GET `/liabilities` - List the caller's liabilities.
async fn list_liabilities(State(state): State<AppState>, caller: Caller) -> Json<Vec<Liability>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.liabilities(caller.0))
}

/// POST `/liabilities` - Record a loan draw-down.
async fn draw_down(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<DrawDownRequest>,
) -> Result<Json<Liability>, ApiError> {
    payload.validate()?;

    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::DrawDownLiability {
            name: payload.name,
            principal: payload.amount,
            interest_rate: payload.interest_rate,
            term_months: payload.time,
            other_expenses: payload.other_expenses,
            source: payload.source,
        },
    )?;
    Ok(Json(primary_document!(document, Liability)))
}

/// POST `/liabilities/{id}` - Pay down part of a liability.
async fn settle(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<LiabilityId>,
    Json(payload): Json<RepaymentRequest>,
) -> Result<Json<Liability>, ApiError> {
    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::Settle {
            target: SettleTarget::Liability(id),
            amount: payload.amount,
            source: payload.payment,
        },
    )?;
    Ok(Json(primary_document!(document, Liability)))
}
