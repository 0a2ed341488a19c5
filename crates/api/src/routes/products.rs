//! Product routes.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use munim_core::inventory::Product;
use munim_db::{ProductRepository, ProductUpdate};
use munim_shared::types::ProductId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products", post(create_product))
        .route("/products/{id}", get(get_product))
        .route("/products/{id}", put(update_product))
        .route("/products/{id}", delete(delete_product))
}

/// Request body for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Product name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub product_name: String,
    /// Opening stock.
    pub number_in_stock: i64,
    /// Cost per piece.
    pub per_piece_cost: Decimal,
    /// Selling price per piece.
    pub per_piece_selling_price: Decimal,
}

/// Request body for updating a product.
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    /// New name.
    pub product_name: Option<String>,
    /// New stock level.
    pub number_in_stock: Option<i64>,
    /// New cost per piece.
    pub per_piece_cost: Option<Decimal>,
    /// New selling price per piece.
    pub per_piece_selling_price: Option<Decimal>,
}

/// GET `/products` - List the caller's products.
async fn list_products(State(state): State<AppState>, caller: Caller) -> Json<Vec<Product>> {
    let repo = ProductRepository::new(state.store.clone());
    Json(repo.list(caller.0))
}

/// POST `/products` - Create a product directly.
async fn create_product(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    payload.validate()?;
    if payload.number_in_stock < 0 {
        return Err(ApiError::validation("number_in_stock cannot be negative"));
    }

    let repo = ProductRepository::new(state.store.clone());
    let product = repo.create(
        caller.0,
        &payload.product_name,
        payload.number_in_stock,
        payload.per_piece_cost,
        payload.per_piece_selling_price,
    );
    Ok(Json(product))
}

/// GET `/products/{id}` - Fetch one product.
async fn get_product(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, ApiError> {
    let repo = ProductRepository::new(state.store.clone());
    Ok(Json(repo.get(caller.0, id)?))
}

/// PUT `/products/{id}` - Update a product's fields.
async fn update_product(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<ProductId>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let repo = ProductRepository::new(state.store.clone());
    let product = repo.update(
        caller.0,
        id,
        ProductUpdate {
            product_name: payload.product_name,
            number_in_stock: payload.number_in_stock,
            per_piece_cost: payload.per_piece_cost,
            per_piece_selling_price: payload.per_piece_selling_price,
        },
    )?;
    Ok(Json(product))
}

/// DELETE `/products/{id}` - Remove a product.
async fn delete_product(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>, ApiError> {
    let repo = ProductRepository::new(state.store.clone());
    repo.delete(caller.0, id)?;
    Ok(Json(json!({ "msg": "Product removed" })))
}
