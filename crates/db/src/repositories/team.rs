//! Team repository for database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::validation::{self, ValidationError};

use super::cascade;
use super::reference::{self, ReferenceError};
use crate::entities::{teams, users};

/// Roster limit used when none is given.
pub const DEFAULT_MAX_PLAYERS: i32 = 20;

/// Error types for team operations.
#[derive(Debug, thiserror::Error)]
pub enum TeamError {
    /// Team not found.
    #[error("Team not found: {0}")]
    NotFound(Uuid),

    /// Coach user not found.
    #[error("Coach not found: {0}")]
    CoachNotFound(Uuid),

    /// Season missing.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a team.
#[derive(Debug, Clone)]
pub struct CreateTeamInput {
    /// Season the team plays in.
    pub season_id: Uuid,
    /// Team name.
    pub name: String,
    /// Age group, e.g. `U10`.
    pub age_group: String,
    /// Sport.
    pub sport: String,
    /// Gender.
    pub gender: Option<String>,
    /// Coach user.
    pub coach_id: Option<Uuid>,
    /// Roster limit.
    pub max_players: Option<i32>,
    /// Players currently on the roster.
    pub current_players: Option<i32>,
    /// Registration fee per player.
    pub registration_fee: Option<Decimal>,
}

/// Team repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TeamRepository {
    db: DatabaseConnection,
}

impl TeamRepository {
    /// Creates a new team repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists teams by name, optionally for one season.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, season_id: Option<Uuid>) -> Result<Vec<teams::Model>, DbErr> {
        let mut query = teams::Entity::find();
        if let Some(season_id) = season_id {
            query = query.filter(teams::Column::SeasonId.eq(season_id));
        }
        query.order_by_asc(teams::Column::Name).all(&self.db).await
    }

    /// Finds a team by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<teams::Model>, DbErr> {
        teams::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a team in an existing season.
    ///
    /// # Errors
    ///
    /// Returns `Reference` for a missing season, `CoachNotFound` for a
    /// dangling coach and `Validation` for negative counts or fees.
    pub async fn create(&self, input: CreateTeamInput) -> Result<teams::Model, TeamError> {
        let max_players = input.max_players.unwrap_or(DEFAULT_MAX_PLAYERS);
        let current_players = input.current_players.unwrap_or_default();
        let registration_fee = input.registration_fee.unwrap_or_default();

        validation::required("name", &input.name)?;
        validation::non_negative_count("max_players", max_players)?;
        validation::non_negative_count("current_players", current_players)?;
        validation::money_amount("registration_fee", registration_fee)?;

        reference::require_season(&self.db, input.season_id).await?;
        if let Some(coach_id) = input.coach_id {
            users::Entity::find_by_id(coach_id)
                .one(&self.db)
                .await?
                .ok_or(TeamError::CoachNotFound(coach_id))?;
        }

        let team = teams::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_id: Set(input.season_id),
            name: Set(input.name),
            age_group: Set(input.age_group),
            sport: Set(input.sport),
            gender: Set(input.gender),
            coach_id: Set(input.coach_id),
            max_players: Set(max_players),
            current_players: Set(current_players),
            registration_fee: Set(registration_fee),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(team_id = %team.id, season_id = %team.season_id, "Team created");
        Ok(team)
    }

    /// Deletes a team with its players, budgets, expenses and revenues.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), TeamError> {
        let txn = self.db.begin().await?;
        let deleted = cascade::delete_team(&txn, id).await?;
        if deleted == 0 {
            return Err(TeamError::NotFound(id));
        }
        txn.commit().await?;

        info!(team_id = %id, "Team deleted");
        Ok(())
    }
}
