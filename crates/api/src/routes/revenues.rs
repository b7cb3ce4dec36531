//! Revenue routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::NaiveDate;
use huddle_core::RevenueCategory;
use huddle_db::{
    RevenueRepository,
    entities::revenues,
    repositories::{CreateRevenueInput, RevenueFilter},
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

/// Creates the revenues router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/revenues", get(list_revenues).post(create_revenue))
        .route(
            "/revenues/{revenue_id}",
            get(get_revenue).delete(delete_revenue),
        )
}

/// Revenue list filters.
#[derive(Debug, Default, Deserialize)]
pub struct RevenueQuery {
    /// Season.
    pub season_id: Option<Uuid>,
    /// Team.
    pub team_id: Option<Uuid>,
    /// Category name, e.g. `sponsorships`.
    pub category: Option<String>,
}

/// Create revenue request body.
#[derive(Debug, Deserialize)]
pub struct CreateRevenueRequest {
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
    /// Who paid, e.g. the sponsor.
    pub source: Option<String>,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
}

async fn list_revenues(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<Value>, ApiError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<RevenueCategory>)
        .transpose()?;
    let revenues = RevenueRepository::new((*state.db).clone())
        .list(RevenueFilter {
            season_id: query.season_id,
            team_id: query.team_id,
            category,
        })
        .await?;
    Ok(Json(json!({ "revenues": revenues })))
}

async fn create_revenue(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateRevenueRequest>,
) -> Result<(StatusCode, Json<revenues::Model>), ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    let revenue = RevenueRepository::new((*state.db).clone())
        .create(CreateRevenueInput {
            season_id: payload.season_id,
            team_id: payload.team_id,
            category: payload.category.parse()?,
            description: payload.description,
            amount: payload.amount,
            source: payload.source,
            payment_date: payload.payment_date,
            notes: payload.notes,
            created_by: caller.user_id(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(revenue)))
}

async fn get_revenue(
    State(state): State<AppState>,
    Path(revenue_id): Path<Uuid>,
) -> Result<Json<revenues::Model>, ApiError> {
    RevenueRepository::new((*state.db).clone())
        .find_by_id(revenue_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Revenue not found: {revenue_id}")))
}

async fn delete_revenue(
    State(state): State<AppState>,
    caller: Caller,
    Path(revenue_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    RevenueRepository::new((*state.db).clone())
        .delete(revenue_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
