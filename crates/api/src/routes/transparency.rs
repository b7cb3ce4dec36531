//! Public transparency reports.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use huddle_core::aggregation::PlayerCostBreakdown;
use huddle_core::reports::TransparencyReport;
use huddle_db::ReportRepository;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Creates the transparency router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transparency/season/{season_id}/report",
            get(season_report),
        )
        .route(
            "/transparency/organization/{org_id}/report",
            get(organization_report),
        )
        .route(
            "/transparency/team/{team_id}/player-costs",
            get(team_player_costs),
        )
}

/// Organization report filter.
#[derive(Debug, Default, Deserialize)]
pub struct OrganizationReportQuery {
    /// Restrict the report to one of the organization's seasons.
    pub season_id: Option<Uuid>,
}

async fn season_report(
    State(state): State<AppState>,
    Path(season_id): Path<Uuid>,
) -> Result<Json<TransparencyReport>, ApiError> {
    let report = ReportRepository::new((*state.db).clone())
        .season_transparency(season_id)
        .await?;
    Ok(Json(report))
}

async fn organization_report(
    State(state): State<AppState>,
    Path(org_id): Path<Uuid>,
    Query(query): Query<OrganizationReportQuery>,
) -> Result<Json<TransparencyReport>, ApiError> {
    let report = ReportRepository::new((*state.db).clone())
        .organization_transparency(org_id, query.season_id)
        .await?;
    Ok(Json(report))
}

async fn team_player_costs(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<PlayerCostBreakdown>, ApiError> {
    let breakdown = ReportRepository::new((*state.db).clone())
        .team_player_costs(team_id)
        .await?;
    Ok(Json(breakdown))
}
