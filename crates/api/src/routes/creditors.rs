//! Creditor routes.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use munim_core::party::Creditor;
use munim_db::{CreditorRepository, CreditorUpdate};
use munim_shared::types::CreditorId;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the creditor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/creditors", get(list_creditors))
        .route("/creditors", post(create_creditor))
        .route("/creditors/{id}", get(get_creditor))
        .route("/creditors/{id}", put(update_creditor))
        .route("/creditors/{id}", delete(delete_creditor))
}

/// Request body for creating a creditor.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCreditorRequest {
    /// Creditor name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Contact number.
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact: String,
    /// Opening due balance.
    pub due: Option<Decimal>,
}

/// Request body for updating a creditor.
#[derive(Debug, Deserialize)]
pub struct UpdateCreditorRequest {
    /// New name.
    pub name: Option<String>,
    /// New contact.
    pub contact: Option<String>,
    /// New due balance.
    pub due: Option<Decimal>,
}

/// GET `/creditors` - List the caller's creditors.
async fn list_creditors(State(state): State<AppState>, caller: Caller) -> Json<Vec<Creditor>> {
    let repo = CreditorRepository::new(state.store.clone());
    Json(repo.list(caller.0))
}

/// POST `/creditors` - Create a creditor.
async fn create_creditor(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateCreditorRequest>,
) -> Result<Json<Creditor>, ApiError> {
    payload.validate()?;
    let repo = CreditorRepository::new(state.store.clone());
    let creditor = repo.create(caller.0, &payload.name, &payload.contact, payload.due);
    Ok(Json(creditor))
}

/// GET `/creditors/{id}` - Fetch one creditor.
async fn get_creditor(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CreditorId>,
) -> Result<Json<Creditor>, ApiError> {
    let repo = CreditorRepository::new(state.store.clone());
    Ok(Json(repo.get(caller.0, id)?))
}

/// PUT `/creditors/{id}` - Update a creditor's fields.
async fn update_creditor(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CreditorId>,
    Json(payload): Json<UpdateCreditorRequest>,
) -> Result<Json<Creditor>, ApiError> {
    let repo = CreditorRepository::new(state.store.clone());
    let creditor = repo.update(
        caller.0,
        id,
        CreditorUpdate {
            name: payload.name,
            contact: payload.contact,
            due: payload.due,
        },
    )?;
    Ok(Json(creditor))
}

/// DELETE `/creditors/{id}` - Remove a creditor.
async fn delete_creditor(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CreditorId>,
) -> Result<Json<Value>, ApiError> {
    let repo = CreditorRepository::new(state.store.clone());
    repo.delete(caller.0, id)?;
    Ok(Json(json!({ "msg": "Creditor removed" })))
}
