//! Sales return routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::SalesReturn;
use munim_core::posting::PostingEvent;
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::{ProductId, SaleId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;

/// Creates the sales return routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales-returns", get(list_returns))
        .route("/sales-returns", post(create_return))
}

/// Request body for posting a sales return.
#[derive(Debug, Deserialize)]
pub struct CreateSalesReturnRequest {
    /// The originating sale.
    pub sales_id: SaleId,
    /// Product being returned.
    pub product_id: ProductId,
    /// Units returned.
    pub quantity: i64,
    /// Refund per unit.
    pub price: Decimal,
}

/// GET `/sales-returns` - List the caller's sales returns.
async fn list_returns(State(state): State<AppState>, caller: Caller) -> Json<Vec<SalesReturn>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.sales_returns(caller.0))
}

/// POST `/sales-returns` - Post a sales return.
async fn create_return(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateSalesReturnRequest>,
) -> Result<Json<SalesReturn>, ApiError> {
    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::ReturnSale {
            sale: payload.sales_id,
            product: payload.product_id,
            quantity: payload.quantity,
            unit_price: payload.price,
        },
    )?;
    Ok(Json(primary_document!(document, SalesReturn)))
}
