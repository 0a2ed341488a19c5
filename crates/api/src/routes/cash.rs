//! Cash ledger routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use munim_core::ledger::{Direction, LedgerEntry, LedgerKind, NetPosition};
use munim_db::LedgerRepository;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the cash routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cash", get(list_entries))
        .route("/cash", post(record_entry))
        .route("/cash/balance", get(balance))
}

/// Request body for recording a manual ledger entry.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordEntryRequest {
    /// Where the money came from or went to.
    #[validate(length(min = 1, message = "Name is required"))]
    pub source: String,
    /// Debit (inflow) or credit (outflow).
    pub direction: Direction,
    /// Positive amount.
    pub amount: Decimal,
    /// Entry date; defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Net balance response for one ledger.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Sum of debit amounts.
    pub debit_total: Decimal,
    /// Sum of credit amounts.
    pub credit_total: Decimal,
    /// Net available.
    pub net: Decimal,
}

impl From<NetPosition> for BalanceResponse {
    fn from(position: NetPosition) -> Self {
        Self {
            net: position.net(),
            debit_total: position.debit_total,
            credit_total: position.credit_total,
        }
    }
}

pub(crate) fn record_for(
    state: &AppState,
    caller: Caller,
    kind: LedgerKind,
    payload: RecordEntryRequest,
) -> Result<LedgerEntry, ApiError> {
    payload.validate()?;
    if payload.amount <= Decimal::ZERO {
        return Err(ApiError::validation("amount must be positive"));
    }

    let repo = LedgerRepository::new(state.store.clone());
    Ok(repo.record(
        caller.0,
        kind,
        &payload.source,
        payload.direction,
        payload.amount,
        payload.date,
    ))
}

/// GET `/cash` - List the caller's cash entries, newest first.
async fn list_entries(State(state): State<AppState>, caller: Caller) -> Json<Vec<LedgerEntry>> {
    let repo = LedgerRepository::new(state.store.clone());
    Json(repo.list(caller.0, LedgerKind::Cash))
}

/// POST `/cash` - Record a manual cash entry.
async fn record_entry(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<RecordEntryRequest>,
) -> Result<Json<LedgerEntry>, ApiError> {
    let entry = record_for(&state, caller, LedgerKind::Cash, payload)?;
    Ok(Json(entry))
}

/// GET `/cash/balance` - Net cash position.
async fn balance(State(state): State<AppState>, caller: Caller) -> Json<BalanceResponse> {
    let repo = LedgerRepository::new(state.store.clone());
    Json(repo.net_position(caller.0, LedgerKind::Cash).into())
}
