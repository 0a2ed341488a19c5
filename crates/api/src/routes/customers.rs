//! Customer routes.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use munim_core::party::Customer;
use munim_db::{CustomerRepository, CustomerUpdate};
use munim_shared::types::CustomerId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers", post(create_customer))
        .route("/customers/{id}", get(get_customer))
        .route("/customers/{id}", put(update_customer))
        .route("/customers/{id}", delete(delete_customer))
}

/// Request body for creating a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    /// Customer name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Mobile number.
    #[validate(length(min = 1, message = "Mobile number is required"))]
    pub mobile: String,
    /// Opening due balance.
    pub due: Option<Decimal>,
}

/// Request body for updating a customer.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    /// New name.
    pub name: Option<String>,
    /// New mobile number.
    pub mobile: Option<String>,
    /// New due balance.
    pub due: Option<Decimal>,
}

/// GET `/customers` - List the caller's customers.
async fn list_customers(State(state): State<AppState>, caller: Caller) -> Json<Vec<Customer>> {
    let repo = CustomerRepository::new(state.store.clone());
    Json(repo.list(caller.0))
}

/// POST `/customers` - Create a customer.
async fn create_customer(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    payload.validate()?;
    let repo = CustomerRepository::new(state.store.clone());
    let customer = repo.create(caller.0, &payload.name, &payload.mobile, payload.due);
    Ok(Json(customer))
}

/// GET `/customers/{id}` - Fetch one customer.
async fn get_customer(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>, ApiError> {
    let repo = CustomerRepository::new(state.store.clone());
    Ok(Json(repo.get(caller.0, id)?))
}

/// PUT `/customers/{id}` - Update a customer's fields.
async fn update_customer(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CustomerId>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    let repo = CustomerRepository::new(state.store.clone());
    let customer = repo.update(
        caller.0,
        id,
        CustomerUpdate {
            name: payload.name,
            mobile: payload.mobile,
            due: payload.due,
        },
    )?;
    Ok(Json(customer))
}

/// DELETE `/customers/{id}` - Remove a customer.
async fn delete_customer(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CustomerId>,
) -> Result<Json<Value>, ApiError> {
    let repo = CustomerRepository::new(state.store.clone());
    repo.delete(caller.0, id)?;
    Ok(Json(json!({ "msg": "Customer removed" })))
}
