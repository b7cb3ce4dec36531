//! Expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use huddle_core::ExpenseCategory;
use huddle_db::{
    ExpenseRepository,
    entities::expenses,
    repositories::{CreateExpenseInput, ExpenseFilter},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the expenses router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route(
            "/expenses/{expense_id}",
            get(get_expense).delete(delete_expense),
        )
}

/// Expense list filters.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQuery {
    /// Season.
    pub season_id: Option<Uuid>,
    /// Team.
    pub team_id: Option<Uuid>,
    /// Category name, e.g. `equipment`.
    pub category: Option<String>,
}

/// Create expense request body.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Season.
    pub season_id: Uuid,
    /// Team, if team specific.
    pub team_id: Option<Uuid>,
    /// Category name.
    pub category: String,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Vendor.
    pub vendor: Option<String>,
    /// Receipt number.
    pub receipt_number: Option<String>,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
}

async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseQuery>,
) -> Result<Json<Value>, ApiError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<ExpenseCategory>)
        .transpose()?;
    let expenses = ExpenseRepository::new((*state.db).clone())
        .list(ExpenseFilter {
            season_id: query.season_id,
            team_id: query.team_id,
            category,
        })
        .await?;
    Ok(Json(json!({ "expenses": expenses })))
}

async fn create_expense(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<expenses::Model>), ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    let expense = ExpenseRepository::new((*state.db).clone())
        .create(CreateExpenseInput {
            season_id: payload.season_id,
            team_id: payload.team_id,
            category: payload.category.parse()?,
            description: payload.description,
            amount: payload.amount,
            vendor: payload.vendor,
            receipt_number: payload.receipt_number,
            payment_date: payload.payment_date,
            notes: payload.notes,
            created_by: caller.user_id(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<Uuid>,
) -> Result<Json<expenses::Model>, ApiError> {
    ExpenseRepository::new((*state.db).clone())
        .find_by_id(expense_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Expense not found: {expense_id}")))
}

async fn delete_expense(
    State(state): State<AppState>,
    caller: Caller,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    ExpenseRepository::new((*state.db).clone())
        .delete(expense_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
