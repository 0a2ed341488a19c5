//! Expense routes.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use munim_core::books::Expense;
use munim_core::ledger::LedgerKind;
use munim_core::posting::{CategoryTarget, PostingEvent};
use munim_db::{BooksRepository, PostingService};
use munim_shared::types::CategoryId;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::Caller;
use crate::AppState;

use super::primary_document;

/// Creates the expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/expenses", post(create_expense))
}

/// Request body for posting an expense.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    /// What the money was spent on.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Existing category to file under.
    pub category_id: Option<CategoryId>,
    /// Category to create on the fly; ignored when `category_id` is set.
    pub category_name: Option<String>,
    /// Ledger the payment leaves from.
    pub source: LedgerKind,
}

/// GET `/expenses` - List the caller's expenses.
async fn list_expenses(State(state): State<AppState>, caller: Caller) -> Json<Vec<Expense>> {
    let repo = BooksRepository::new(state.store.clone());
    Json(repo.expenses(caller.0))
}

/// POST `/expenses` - Post an expense.
async fn create_expense(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    payload.validate()?;

    let category = match (payload.category_id, payload.category_name) {
        (Some(id), _) => Some(CategoryTarget::Existing(id)),
        (None, Some(name)) if !name.trim().is_empty() => Some(CategoryTarget::New { name }),
        _ => None,
    };

    let service = PostingService::new(state.store.clone());
    let document = service.post(
        caller.0,
        PostingEvent::Expense {
            name: payload.name,
            amount: payload.amount,
            category,
            source: payload.source,
        },
    )?;
    Ok(Json(primary_document!(document, Expense)))
}
