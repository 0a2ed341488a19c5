//! Sales routes.

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::{PaymentMethod, Sale};
use munim_core::posting::{PostingEvent, SaleLineInput};
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::{CustomerId, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;

/// Creates the sales routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales", post(create_sale))
}

/// Query parameters for listing sales.
#[derive(Debug, Deserialize)]
pub struct ListSalesQuery {
    /// When set, lists only credit sales containing this product.
    pub product: Option<String>,
}

/// One requested sale line.
#[derive(Debug, Deserialize)]
pub struct SaleLineRequest {
    /// Product to sell.
    pub product_id: ProductId,
    /// Units sold.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Request body for posting a sale.
#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    /// Sold lines; a single-product sale is a one-element list.
    pub lines: Vec<SaleLineRequest>,
    /// Customer to freeze into the document.
    pub customer_id: Option<CustomerId>,
    /// How the sale was paid.
    pub payment: PaymentMethod,
    /// Extras added to the total.
    pub other_expenses: Option<Decimal>,
}

/// GET `/sales` - List sales, optionally credit sales per product.
async fn list_sales(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<ListSalesQuery>,
) -> Json<Vec<Sale>> {
    let repo = BooksRepository::new(state.store.clone());
    let sales = match query.product {
        Some(product) => repo.credit_sales_for_product(caller.0, &product),
        None => repo.sales(caller.0),
    };
    Json(sales)
}

/// POST `/sales` - Post a sale.
async fn create_sale(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateSaleRequest>,
) -> Result<Json<Sale>, ApiError> {
    let lines = payload
        .lines
        .into_iter()
        .map(|line| SaleLineInput {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect();

    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::Sale {
            lines,
            customer: payload.customer_id,
            payment: payload.payment,
            other_expenses: payload.other_expenses,
        },
    )?;
    Ok(Json(primary_document!(document, Sale)))
}
