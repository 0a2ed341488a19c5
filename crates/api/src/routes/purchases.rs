//! Purchase routes.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::{PaymentMethod, Purchase};
use munim_core::posting::{PostingEvent, ProductTarget};
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::{CreditorId, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::{funding_source, primary_document};

/// Creates the purchase routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/purchases", get(list_purchases))
        .route("/purchases", post(create_purchase))
}

/// Query parameters for listing purchases.
#[derive(Debug, Deserialize)]
pub struct ListPurchasesQuery {
    /// When set, lists only credit purchases of this product.
    pub product: Option<String>,
}

/// Request body for posting a purchase.
#[derive(Debug, Deserialize)]
pub struct CreatePurchaseRequest {
    /// Existing product to restock; mutually exclusive with `new_product`.
    pub product_id: Option<ProductId>,
    /// True when this purchase introduces a new product.
    #[serde(default)]
    pub new_product: bool,
    /// Name for the new product.
    pub product_name: Option<String>,
    /// How the purchase is funded.
    pub payment: PaymentMethod,
    /// Creditor for credit purchases.
    pub creditor_id: Option<CreditorId>,
    /// Units bought.
    pub quantity: i64,
    /// Cost per piece.
    pub per_piece_cost: Decimal,
    /// Selling price per piece.
    pub per_piece_selling_price: Decimal,
    /// Extras added to the total.
    pub other_expenses: Option<Decimal>,
}

/// GET `/purchases` - List purchases, optionally credit purchases per product.
async fn list_purchases(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListPurchasesQuery>,
) -> Json<Vec<Purchase>> {
    let repo = BooksRepository::new(state.store.clone());
    let purchases = match query.product {
        Some(product) => repo.credit_purchases_for_product(caller.0, &product),
        None => repo.purchases(caller.0),
    };
    Json(purchases)
}

/// POST `/purchases` - Post a purchase.
async fn create_purchase(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreatePurchaseRequest>,
) -> Result<Json<Purchase>, ApiError> {
    let target = if payload.new_product {
        let name = payload
            .product_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::validation("product_name is required for a new product"))?;
        ProductTarget::New { name }
    } else {
        let id = payload
            .product_id
            .ok_or_else(|| ApiError::validation("product_id is required"))?;
        ProductTarget::Existing(id)
    };
    let source = funding_source(payload.payment, payload.creditor_id)?;

    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::Purchase {
            target,
            quantity: payload.quantity,
            per_piece_cost: payload.per_piece_cost,
            per_piece_selling_price: payload.per_piece_selling_price,
            other_expenses: payload.other_expenses,
            source,
        },
    )?;
    Ok(Json(primary_document!(document, Purchase)))
}
