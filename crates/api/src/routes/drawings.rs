//! Owner drawing routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::{Drawing, DrawingKind};
use munim_core::posting::{PostingEvent, SaleLineInput};
use munim_db::{BooksRepository, PostingService};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;
use super::sales::SaleLineRequest;

/// Creates the drawing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/drawings", get(list_drawings))
        .route("/drawings", post(create_drawing))
}

/// Request body for posting a drawing.
#[derive(Debug, Deserialize)]
pub struct CreateDrawingRequest {
    /// Cash or stock.
    pub kind: DrawingKind,
    /// Amount for cash drawings.
    pub amount: Option<Decimal>,
    /// Withdrawn lines for stock drawings.
    pub products: Option<Vec<SaleLineRequest>>,
}

/// GET `/drawings` - List the caller's drawings.
async fn list_drawings(State(state): State<AppState>, caller: Caller) -> Json<Vec<Drawing>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.drawings(caller.0))
}

/// POST `/drawings` - Post a cash or stock drawing.
async fn create_drawing(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateDrawingRequest>,
) -> Result<Json<Drawing>, ApiError> {
    let event = match payload.kind {
        DrawingKind::Cash => {
            let amount = payload
                .amount
                .ok_or_else(|| ApiError::validation("amount is required for a cash drawing"))?;
            PostingEvent::DrawCash { amount }
        }
        DrawingKind::Stock => {
            let products = payload
                .products
                .ok_or_else(|| ApiError::validation("products are required for a stock drawing"))?;
            PostingEvent::DrawStock {
                lines: products
                    .into_iter()
                    .map(|line| SaleLineInput {
                        product_id: line.product_id,
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                    })
                    .collect(),
            }
        }
    };

    let service = PostingService::new(state.store.clone());
    let document = service.post(caller.0, event)?;
    Ok(Json(primary_document!(document, Drawing)))
}
