//! Asset routes.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::{Asset, PaymentMethod};
use munim_core::ledger::LedgerKind;
use munim_core::posting::{PostingEvent, SettleTarget};
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::{AssetId, CreditorId};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::{funding_source, primary_document};

/// Creates the asset routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/assets", get(list_assets))
        .route("/assets", post(acquire_asset))
        .route("/assets/{id}", post(extend_asset))
        .route("/assets/{id}/settlements", post(settle_asset))
}

/// Request body for acquiring an asset.
#[derive(Debug, Deserialize, Validate)]
pub struct AcquireAssetRequest {
    /// Asset name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Principal amount.
    pub amount: Decimal,
    /// Extras, defaulting to zero.
    pub other_expenses: Option<Decimal>,
    /// How the acquisition is funded.
    pub payment: PaymentMethod,
    /// Creditor for credit acquisitions.
    pub creditor_id: Option<CreditorId>,
}

/// Request body for extending an asset.
#[derive(Debug, Deserialize)]
pub struct ExtendAssetRequest {
    /// Additional amount.
    pub amount: Decimal,
    /// Extras, defaulting to zero.
    pub other_expenses: Option<Decimal>,
    /// How the extension is funded.
    pub payment: PaymentMethod,
    /// Creditor for credit extensions.
    pub creditor_id: Option<CreditorId>,
}

/// Request body for settling part of an asset.
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    /// Settlement amount.
    pub amount: Decimal,
    /// Ledger the payment leaves from.
    pub payment: LedgerKind,
}

/// GET `/assets` - List the caller's assets.
async fn list_assets(State(state): State<AppState>, caller: Caller) -> Json<Vec<Asset>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.assets(caller.0))
}

/// POST `/assets` - Acquire a new asset.
async fn acquire_asset(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<AcquireAssetRequest>,
) -> Result<Json<Asset>, ApiError> {
    payload.validate()?;
    let source = funding_source(payload.payment, payload.creditor_id)?;

    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::AcquireAsset {
            name: payload.name,
            amount: payload.amount,
            other_expenses: payload.other_expenses,
            source,
        },
    )?;
    Ok(Json(primary_document!(document, Asset)))
}

/// POST `/assets/{id}` - Put more money into an asset.
async fn extend_asset(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<AssetId>,
    Json(payload): Json<ExtendAssetRequest>,
) -> Result<Json<Asset>, ApiError> {
    let source = funding_source(payload.payment, payload.creditor_id)?;

    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::ExtendAsset {
            asset: id,
            amount: payload.amount,
            other_expenses: payload.other_expenses,
            source,
        },
    )?;
    Ok(Json(primary_document!(document, Asset)))
}

/// POST `/assets/{id}/settlements` - Pay down an asset's outstanding amount.
async fn settle_asset(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<AssetId>,
    Json(payload): Json<SettleRequest>,
) -> Result<Json<Asset>, ApiError> {
    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::Settle {
            target: SettleTarget::Asset(id),
            amount: payload.amount,
            source: payload.payment,
        },
    )?;
    Ok(Json(primary_document!(document, Asset)))
}
