//! Purchase return routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::PurchaseReturn;
use munim_core::posting::PostingEvent;
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::{ProductId, PurchaseId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;

/// Creates the purchase return routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchase-returns", get(list_returns))
        .route("/purchase-returns", post(create_return))
}

/// Request body for posting a purchase return.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseReturnRequest {
    /// The originating purchase.
    pub purchase_id: PurchaseId,
    /// Product being returned.
    pub product_id: ProductId,
    /// Units returned.
    pub quantity: i64,
    /// Refund per piece.
    pub per_piece_cost: Decimal,
}

/// GET `/purchase-returns` - List the caller's purchase returns.
async fn list_returns(State(state): State<AppState>, caller: Caller) -> Json<Vec<PurchaseReturn>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.purchase_returns(caller.0))
}

/// POST `/purchase-returns` - Post a purchase return.
async fn create_return(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreatePurchaseReturnRequest>,
) -> Result<Json<PurchaseReturn>, ApiError> {
    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::ReturnPurchase {
            purchase: payload.purchase_id,
            product: payload.product_id,
            quantity: payload.quantity,
            per_piece_cost: payload.per_piece_cost,
        },
    )?;
    Ok(Json(primary_document!(document, PurchaseReturn)))
}
