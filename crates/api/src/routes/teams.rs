//! Team routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use huddle_db::{TeamRepository, entities::teams, repositories::CreateTeamInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the teams router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/teams", get(list_teams).post(create_team))
        .route("/teams/{team_id}", get(get_team).delete(delete_team))
}

/// Team list filters.
#[derive(Debug, Default, Deserialize)]
pub struct TeamQuery {
    /// Only teams in this season.
    pub season_id: Option<Uuid>,
}

/// Create team request body.
#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    /// Season the team plays in.
    pub season_id: Uuid,
    /// Name.
    pub name: String,
    /// Age group, e.g. `U10`.
    pub age_group: String,
    /// Sport.
    pub sport: String,
    /// Gender.
    pub gender: Option<String>,
    /// Coach user.
    pub coach_id: Option<Uuid>,
    /// Roster limit. Defaults to 20.
    pub max_players: Option<i32>,
    /// Current roster size. Defaults to 0.
    pub current_players: Option<i32>,
    /// Fee per player. Defaults to 0.
    pub registration_fee: Option<Decimal>,
}

async fn list_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamQuery>,
) -> Result<Json<Value>, ApiError> {
    let teams = TeamRepository::new((*state.db).clone())
        .list(query.season_id)
        .await?;
    Ok(Json(json!({ "teams": teams })))
}

async fn create_team(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<teams::Model>), ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    let team = TeamRepository::new((*state.db).clone())
        .create(CreateTeamInput {
            season_id: payload.season_id,
            name: payload.name,
            age_group: payload.age_group,
            sport: payload.sport,
            gender: payload.gender,
            coach_id: payload.coach_id,
            max_players: payload.max_players,
            current_players: payload.current_players,
            registration_fee: payload.registration_fee,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<teams::Model>, ApiError> {
    TeamRepository::new((*state.db).clone())
        .find_by_id(team_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Team not found: {team_id}")))
}

async fn delete_team(
    State(state): State<AppState>,
    caller: Caller,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::ManageStructure)?;
    TeamRepository::new((*state.db).clone())
        .delete(team_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
