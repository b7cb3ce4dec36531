//! Player repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::validation::{self, ValidationError};

use super::reference::{self, ReferenceError};
use crate::entities::players;

/// Error types for player operations.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// Player not found.
    #[error("Player not found: {0}")]
    NotFound(Uuid),

    /// Team missing.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for registering a player.
#[derive(Debug, Clone)]
pub struct CreatePlayerInput {
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
    pub registration_fee_paid: bool,
    /// Fee owed by this player. Defaults to the team's fee.
    pub registration_fee_amount: Option<Decimal>,
    /// Registration date.
    pub registration_date: Option<NaiveDate>,
    /// Jersey number.
    pub jersey_number: Option<i32>,
    /// Notes.
    pub notes: Option<String>,
}

/// Player repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PlayerRepository {
    db: DatabaseConnection,
}

impl PlayerRepository {
    /// Creates a new player repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists players by last then first name, optionally for one team.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, team_id: Option<Uuid>) -> Result<Vec<players::Model>, DbErr> {
        let mut query = players::Entity::find();
        if let Some(team_id) = team_id {
            query = query.filter(players::Column::TeamId.eq(team_id));
        }
        query
            .order_by_asc(players::Column::LastName)
            .order_by_asc(players::Column::FirstName)
            .all(&self.db)
            .await
    }

    /// Finds a player by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<players::Model>, DbErr> {
        players::Entity::find_by_id(id).one(&self.db).await
    }

    /// Registers a player on an existing team.
    ///
    /// The team's `current_players` is not touched; it is maintained by the
    /// team and bulk fee paths.
    ///
    /// # Errors
    ///
    /// Returns `Reference` for a missing team and `Validation` for blank
    /// names or a negative fee.
    pub async fn create(&self, input: CreatePlayerInput) -> Result<players::Model, PlayerError> {
        validation::required("first_name", &input.first_name)?;
        validation::required("last_name", &input.last_name)?;

        let team = reference::require_team(&self.db, input.team_id).await?;
        let fee = input.registration_fee_amount.unwrap_or(team.registration_fee);
        validation::money_amount("registration_fee_amount", fee)?;

        let player = players::ActiveModel {
            id: Set(Uuid::new_v4()),
            team_id: Set(input.team_id),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            date_of_birth: Set(input.date_of_birth),
            parent_name: Set(input.parent_name),
            parent_email: Set(input.parent_email),
            parent_phone: Set(input.parent_phone),
            registration_fee_paid: Set(input.registration_fee_paid),
            registration_fee_amount: Set(fee),
            registration_date: Set(input.registration_date),
            jersey_number: Set(input.jersey_number),
            notes: Set(input.notes),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(player_id = %player.id, team_id = %player.team_id, "Player registered");
        Ok(player)
    }

    /// Marks a player's registration fee paid or unpaid, optionally
    /// correcting the amount.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the player does not exist.
    pub async fn set_fee_paid(
        &self,
        id: Uuid,
        paid: bool,
        amount: Option<Decimal>,
    ) -> Result<players::Model, PlayerError> {
        if let Some(amount) = amount {
            validation::money_amount("registration_fee_amount", amount)?;
        }

        let existing = self.find_by_id(id).await?.ok_or(PlayerError::NotFound(id))?;
        let mut player: players::ActiveModel = existing.into();
        player.registration_fee_paid = Set(paid);
        if let Some(amount) = amount {
            player.registration_fee_amount = Set(amount);
        }

        let player = player.update(&self.db).await?;
        info!(player_id = %id, paid, "Player registration fee updated");
        Ok(player)
    }

    /// Deletes a player.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the player does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), PlayerError> {
        let result = players::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(PlayerError::NotFound(id));
        }

        info!(player_id = %id, "Player deleted");
        Ok(())
    }
}
