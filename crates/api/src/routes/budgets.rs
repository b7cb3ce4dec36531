//! Budget routes and budget summaries.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use huddle_core::reports::{SeasonBudgetSummary, TeamBudgetSummary};
use huddle_db::{
    BudgetRepository, ReportRepository,
    entities::budgets,
    repositories::{BudgetFilter, CreateBudgetInput},
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

/// Creates the budgets router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/summary", get(season_summary))
        .route("/budgets/team/{team_id}/summary", get(team_summary))
        .route("/budgets/{budget_id}", delete(delete_budget))
}

/// Budget list filters.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetQuery {
    /// Only budgets of this season.
    pub season_id: Option<Uuid>,
    /// Only budgets of this team.
    pub team_id: Option<Uuid>,
}

/// Season summary query.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Season to summarize.
    pub season_id: Uuid,
}

/// Create budget request body.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    /// Season.
    pub season_id: Uuid,
    /// Team, or none for a season-wide line.
    pub team_id: Option<Uuid>,
    /// Free-form budget line label.
    pub category: String,
    /// Planned amount.
    pub budgeted_amount: Decimal,
    /// Notes.
    pub notes: Option<String>,
}

async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<BudgetQuery>,
) -> Result<Json<Value>, ApiError> {
    let budgets = BudgetRepository::new((*state.db).clone())
        .list(BudgetFilter {
            season_id: query.season_id,
            team_id: query.team_id,
        })
        .await?;
    Ok(Json(json!({ "budgets": budgets })))
}

async fn create_budget(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<budgets::Model>), ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    let budget = BudgetRepository::new((*state.db).clone())
        .create(CreateBudgetInput {
            season_id: payload.season_id,
            team_id: payload.team_id,
            category: payload.category,
            budgeted_amount: payload.budgeted_amount,
            notes: payload.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(budget)))
}

async fn delete_budget(
    State(state): State<AppState>,
    caller: Caller,
    Path(budget_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    BudgetRepository::new((*state.db).clone())
        .delete(budget_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /budgets/summary?season_id= - Season totals.
async fn season_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SeasonBudgetSummary>, ApiError> {
    let summary = ReportRepository::new((*state.db).clone())
        .season_summary(query.season_id)
        .await?;
    Ok(Json(summary))
}

/// GET /budgets/team/{team_id}/summary - Team totals and fee collection.
async fn team_summary(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamBudgetSummary>, ApiError> {
    let summary = ReportRepository::new((*state.db).clone())
        .team_summary(team_id)
        .await?;
    Ok(Json(summary))
}
