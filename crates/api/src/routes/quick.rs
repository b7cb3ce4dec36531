//! Quick data-entry shortcuts.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::post,
};
use chrono::NaiveDate;
use huddle_core::ExpenseCategory;
use huddle_db::{
    QuickEntryRepository,
    repositories::{BulkRegistrationInput, QuickExpenseInput},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the quick actions router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/quick/bulk-registration-fees",
            post(bulk_registration_fees),
        )
        .route("/quick/quick-expense", post(quick_expense))
}

/// Bulk registration fee body.
#[derive(Debug, Deserialize)]
pub struct BulkRegistrationRequest {
    /// Team the players joined.
    pub team_id: Uuid,
    /// Number of players registered.
    pub player_count: i32,
    /// Fee each player paid.
    pub fee_per_player: Decimal,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
}

/// Bulk registration fee result.
#[derive(Debug, Serialize)]
pub struct BulkRegistrationResponse {
    /// Human readable outcome.
    pub message: String,
    /// The revenue that was recorded.
    pub revenue_id: Uuid,
    /// `player_count * fee_per_player`.
    pub total_amount: Decimal,
}

/// Query of the quick expense endpoint.
#[derive(Debug, Deserialize)]
pub struct QuickExpenseQuery {
    /// Expense category name.
    pub category: String,
    /// Season the expense is booked against.
    pub season_id: Uuid,
}

/// Quick expense body.
#[derive(Debug, Deserialize)]
pub struct QuickExpenseRequest {
    /// Team.
    pub team_id: Uuid,
    /// Amount.
    pub amount: Decimal,
    /// Description.
    pub description: String,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Players sharing the cost.
    pub player_count: Option<i32>,
}

/// Quick expense result.
#[derive(Debug, Serialize)]
pub struct QuickExpenseResponse {
    /// Human readable outcome.
    pub message: String,
    /// The expense that was recorded.
    pub expense_id: Uuid,
    /// Cost per player, when a player count was given.
    pub per_player_cost: Option<Decimal>,
}

/// POST /quick/bulk-registration-fees - One revenue for a batch of sign-ups.
async fn bulk_registration_fees(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<BulkRegistrationRequest>,
) -> Result<(StatusCode, Json<BulkRegistrationResponse>), ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    let player_count = payload.player_count;

    let outcome = QuickEntryRepository::new((*state.db).clone())
        .bulk_registration_fees(BulkRegistrationInput {
            team_id: payload.team_id,
            player_count,
            fee_per_player: payload.fee_per_player,
            payment_date: payload.payment_date,
            notes: payload.notes,
            created_by: caller.user_id(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BulkRegistrationResponse {
            message: format!("Recorded registration fees for {player_count} players"),
            revenue_id: outcome.revenue.id,
            total_amount: outcome.total_amount,
        }),
    ))
}

/// POST /quick/quick-expense?category=&season_id= - Expense with an optional per-player split.
async fn quick_expense(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<QuickExpenseQuery>,
    Json(payload): Json<QuickExpenseRequest>,
) -> Result<(StatusCode, Json<QuickExpenseResponse>), ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    let category: ExpenseCategory = query.category.parse()?;

    let outcome = QuickEntryRepository::new((*state.db).clone())
        .quick_expense(QuickExpenseInput {
            season_id: query.season_id,
            team_id: payload.team_id,
            category,
            amount: payload.amount,
            description: payload.description,
            payment_date: payload.payment_date,
            player_count: payload.player_count,
            created_by: caller.user_id(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(QuickExpenseResponse {
            message: format!("Recorded {category} expense"),
            expense_id: outcome.expense.id,
            per_player_cost: outcome.per_player_cost,
        }),
    ))
}
