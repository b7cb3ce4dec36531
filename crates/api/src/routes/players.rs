//! Player roster routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use chrono::NaiveDate;
use huddle_db::{PlayerRepository, entities::players, repositories::CreatePlayerInput};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::ApiError,
    middleware::{Caller, Permission},
};

/// Creates the players router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players).post(create_player))
        .route(
            "/players/{player_id}",
            get(get_player).delete(delete_player),
        )
        .route(
            "/players/{player_id}/registration-fee",
            put(update_registration_fee),
        )
}

/// Player list filters.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    /// Only players on this team.
    pub team_id: Option<Uuid>,
}

/// Create player request body.
#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    /// Team.
    pub team_id: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: Option<NaiveDate>,
    /// Parent or guardian name.
    pub parent_name: Option<String>,
    /// Parent email.
    pub parent_email: Option<String>,
    /// Parent phone.
    pub parent_phone: Option<String>,
    /// Whether the fee is already paid.
    #[serde(default)]
    pub registration_fee_paid: bool,
    /// Fee owed. Defaults to the team's registration fee.
    pub registration_fee_amount: Option<Decimal>,
    /// Registration date.
    pub registration_date: Option<NaiveDate>,
    /// Jersey number.
    pub jersey_number: Option<i32>,
    /// Notes.
    pub notes: Option<String>,
}

/// Registration fee update body.
#[derive(Debug, Deserialize)]
pub struct RegistrationFeeRequest {
    /// Paid or unpaid.
    pub paid: bool,
    /// Corrected amount, if any.
    pub amount: Option<Decimal>,
}

async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Value>, ApiError> {
    let players = PlayerRepository::new((*state.db).clone())
        .list(query.team_id)
        .await?;
    Ok(Json(json!({ "players": players })))
}

async fn create_player(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<players::Model>), ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    let player = PlayerRepository::new((*state.db).clone())
        .create(CreatePlayerInput {
            team_id: payload.team_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            date_of_birth: payload.date_of_birth,
            parent_name: payload.parent_name,
            parent_email: payload.parent_email,
            parent_phone: payload.parent_phone,
            registration_fee_paid: payload.registration_fee_paid,
            registration_fee_amount: payload.registration_fee_amount,
            registration_date: payload.registration_date,
            jersey_number: payload.jersey_number,
            notes: payload.notes,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<Uuid>,
) -> Result<Json<players::Model>, ApiError> {
    PlayerRepository::new((*state.db).clone())
        .find_by_id(player_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Player not found: {player_id}")))
}

async fn update_registration_fee(
    State(state): State<AppState>,
    caller: Caller,
    Path(player_id): Path<Uuid>,
    Json(payload): Json<RegistrationFeeRequest>,
) -> Result<Json<players::Model>, ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    let player = PlayerRepository::new((*state.db).clone())
        .set_fee_paid(player_id, payload.paid, payload.amount)
        .await?;
    Ok(Json(player))
}

async fn delete_player(
    State(state): State<AppState>,
    caller: Caller,
    Path(player_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(&state, Permission::RecordFinances)?;
    PlayerRepository::new((*state.db).clone())
        .delete(player_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
