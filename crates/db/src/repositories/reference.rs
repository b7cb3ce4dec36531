//! Parent-record checks shared by the finance repositories.

use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use uuid::Uuid;

use crate::entities::{seasons, teams};

/// A referenced parent record is missing or inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Season does not exist.
    #[error("Season not found: {0}")]
    SeasonNotFound(Uuid),

    /// Team does not exist.
    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),

    /// Team exists but plays in another season.
    #[error("Team {team_id} does not belong to season {season_id}")]
    TeamNotInSeason {
        /// Team ID.
        team_id: Uuid,
        /// Season the record was booked against.
        season_id: Uuid,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Loads a season or fails with `SeasonNotFound`.
pub async fn require_season<C>(conn: &C, season_id: Uuid) -> Result<seasons::Model, ReferenceError>
where
    C: ConnectionTrait,
{
    seasons::Entity::find_by_id(season_id)
        .one(conn)
        .await?
        .ok_or(ReferenceError::SeasonNotFound(season_id))
}

/// Loads a team or fails with `TeamNotFound`.
pub async fn require_team<C>(conn: &C, team_id: Uuid) -> Result<teams::Model, ReferenceError>
where
    C: ConnectionTrait,
{
    teams::Entity::find_by_id(team_id)
        .one(conn)
        .await?
        .ok_or(ReferenceError::TeamNotFound(team_id))
}

/// Checks the season exists and, when a team is given, that the team
/// exists and plays in that season.
pub async fn require_scope<C>(
    conn: &C,
    season_id: Uuid,
    team_id: Option<Uuid>,
) -> Result<(), ReferenceError>
where
    C: ConnectionTrait,
{
    require_season(conn, season_id).await?;
    if let Some(team_id) = team_id {
        let team = require_team(conn, team_id).await?;
        ensure_same_season(&team, season_id)?;
    }
    Ok(())
}

/// Fails with `TeamNotInSeason` when the team plays in another season.
pub fn ensure_same_season(team: &teams::Model, season_id: Uuid) -> Result<(), ReferenceError> {
    if team.season_id == season_id {
        Ok(())
    } else {
        Err(ReferenceError::TeamNotInSeason {
            team_id: team.id,
            season_id,
        })
    }
}
