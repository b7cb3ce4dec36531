//! Season routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{Datelike, NaiveDate};
use huddle_core::SeasonType;
use huddle_db::{SeasonRepository, entities::seasons, repositories::SeasonInput};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the seasons router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/seasons", get(list_seasons).post(create_season))
        .route(
            "/seasons/{season_id}",
            get(get_season).put(update_season).delete(delete_season),
        )
}

/// Season list filters.
#[derive(Debug, Default, Deserialize)]
pub struct SeasonQuery {
    /// Only seasons of this organization.
    pub organization_id: Option<Uuid>,
}

/// Season create/replace body.
#[derive(Debug, Deserialize)]
pub struct SeasonRequest {
    /// Display name.
    pub name: String,
    /// `spring`, `summer`, `fall` or `winter`. Defaults to `fall`.
    pub season_type: Option<String>,
    /// Calendar year. Defaults to the start date's year.
    pub year: Option<i32>,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
    /// Owning organization.
    pub organization_id: Option<Uuid>,
}

impl TryFrom<SeasonRequest> for SeasonInput {
    type Error = ApiError;

    fn try_from(req: SeasonRequest) -> Result<Self, Self::Error> {
        let season_type = match req.season_type.as_deref() {
            Some(value) => value.parse()?,
            None => SeasonType::default(),
        };
        Ok(Self {
            organization_id: req.organization_id,
            name: req.name,
            season_type,
            year: req.year.unwrap_or_else(|| req.start_date.year()),
            start_date: req.start_date,
            end_date: req.end_date,
            is_active: req.is_active.unwrap_or(true),
        })
    }
}

async fn list_seasons(
    State(state): State<AppState>,
    Query(query): Query<SeasonQuery>,
) -> Result<Json<Value>, ApiError> {
    let seasons = SeasonRepository::new((*state.db).clone())
        .list(query.organization_id)
        .await?;
    Ok(Json(json!({ "seasons": seasons })))
}

async fn create_season(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<SeasonRequest>,
) -> Result<(StatusCode, Json<seasons::Model>), ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    let season = SeasonRepository::new((*state.db).clone())
        .create(payload.try_into()?)
        .await?;
    Ok((StatusCode::CREATED, Json(season)))
}

async fn get_season(
    State(state): State<AppState>,
    Path(season_id): Path<Uuid>,
) -> Result<Json<seasons::Model>, ApiError> {
    SeasonRepository::new((*state.db).clone())
        .find_by_id(season_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Season not found: {season_id}")))
}

async fn update_season(
    State(state): State<AppState>,
    caller: Caller,
    Path(season_id): Path<Uuid>,
    Json(payload): Json<SeasonRequest>,
) -> Result<Json<seasons::Model>, ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    let season = SeasonRepository::new((*state.db).clone())
        .update(season_id, payload.try_into()?)
        .await?;
    Ok(Json(season))
}

async fn delete_season(
    State(state): State<AppState>,
    caller: Caller,
    Path(season_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    SeasonRepository::new((*state.db).clone())
        .delete(season_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
