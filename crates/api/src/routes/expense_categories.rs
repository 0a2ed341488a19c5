//! Expense category routes.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use munim_core::books::ExpenseCategory;
use munim_db::BooksRepository;
use munim_shared::types::CategoryId;
use serde::Deserialize;
use serde_json::{Value, json};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

/// Creates the expense category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expense-categories", get(list_categories))
        .route("/expense-categories", post(create_category))
        .route("/expense-categories/{id}", get(get_category))
        .route("/expense-categories/{id}", put(rename_category))
        .route("/expense-categories/{id}", delete(delete_category))
}

/// Request body for creating or renaming a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    /// Category name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// GET `/expense-categories` - List the caller's categories.
async fn list_categories(
    State(state): State<AppState>,
    caller: Caller,
) -> Json<Vec<ExpenseCategory>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.categories(caller.0))
}

/// POST `/expense-categories` - Create a category.
async fn create_category(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<ExpenseCategory>, ApiError> {
    payload.validate()?;
    let repo = BooksRepository::new(state.store.clone());
    Ok(Json(repo.create_category(caller.0, &payload.name)))
}

/// GET `/expense-categories/{id}` - Fetch one category.
async fn get_category(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CategoryId>,
) -> Result<Json<ExpenseCategory>, ApiError> {
    let repo = BooksRepository::new(state.store.clone());
    Ok(Json(repo.category(caller.0, id)?))
}

/// PUT `/expense-categories/{id}` - Rename a category.
async fn rename_category(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<ExpenseCategory>, ApiError> {
    payload.validate()?;
    let repo = BooksRepository::new(state.store.clone());
    Ok(Json(repo.rename_category(caller.0, id, &payload.name)?))
}

/// DELETE `/expense-categories/{id}` - Remove a category.
async fn delete_category(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<CategoryId>,
) -> Result<Json<Value>, ApiError> {
    let repo = BooksRepository::new(state.store.clone());
    repo.delete_category(caller.0, id)?;
    Ok(Json(json!({ "msg": "Category removed" })))
}
