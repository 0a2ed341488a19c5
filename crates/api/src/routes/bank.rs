//! Bank ledger routes.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use munim_core::ledger::{LedgerEntry, LedgerKind};
use munim_db::LedgerRepository;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::cash::{BalanceResponse, RecordEntryRequest, record_for};

/// Creates the bank routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank", get(list_entries))
        .route("/bank", post(record_entry))
        .route("/bank/range", get(list_range))
        .route("/bank/balance", get(balance))
}

/// Query parameters for a date-range listing.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Inclusive range start.
    pub from: DateTime<Utc>,
    /// Exclusive range end.
    pub to: DateTime<Utc>,
}

/// GET `/bank` - List the caller's bank entries, newest first.
async fn list_entries(State(state): State<AppState>, caller: Caller) -> Json<Vec<LedgerEntry>> {
    let repo = LedgerRepository::new(state.store.clone());
    Json(repo.list(caller.0, LedgerKind::Bank))
}

/// POST `/bank` - Record a manual bank entry.
async fn record_entry(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<RecordEntryRequest>,
) -> Result<Json<LedgerEntry>, ApiError> {
    let entry = record_for(&state, caller, LedgerKind::Bank, payload)?;
    Ok(Json(entry))
}

/// GET `/bank/range` - Bank entries inside a date range.
async fn list_range(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<RangeQuery>,
) -> Json<Vec<LedgerEntry>> {
    let repo = LedgerRepository::new(state.store.clone());
    Json(repo.list_range(caller.0, LedgerKind::Bank, query.from, query.to))
}

/// GET `/bank/balance` - Net bank position.
async fn balance(State(state): State<AppState>, caller: Caller) -> Json<BalanceResponse> {
    let repo = LedgerRepository::new(state.store.clone());
    Json(repo.net_position(caller.0, LedgerKind::Bank).into())
}
