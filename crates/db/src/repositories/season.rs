//! Season repository for database operations.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::SeasonType;
use huddle_core::validation::{self, ValidationError};

use super::cascade;
use crate::entities::{organizations, seasons};

/// Error types for season operations.
#[derive(Debug, thiserror::Error)]
pub enum SeasonError {
    /// Season not found.
    #[error("Season not found: {0}")]
    NotFound(Uuid),

    /// Organization not found.
    #[error("Organization not found: {0}")]
    OrganizationNotFound(Uuid),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Full set of season fields, used for both create and replace.
#[derive(Debug, Clone)]
pub struct SeasonInput {
    /// Owning organization.
    pub organization_id: Option<Uuid>,
    /// Display name, e.g. "Spring 2024".
    pub name: String,
    /// Part of the year.
    pub season_type: SeasonType,
    /// Calendar year.
    pub year: i32,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Whether the season is current.
    pub is_active: bool,
}

impl SeasonInput {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::required("name", &self.name)?;
        validation::date_range(self.start_date, self.end_date)
    }
}

/// Season repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SeasonRepository {
    db: DatabaseConnection,
}

impl SeasonRepository {
    /// Creates a new season repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists seasons, newest first, optionally for one organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, organization_id: Option<Uuid>) -> Result<Vec<seasons::Model>, DbErr> {
        let mut query = seasons::Entity::find();
        if let Some(org_id) = organization_id {
            query = query.filter(seasons::Column::OrganizationId.eq(org_id));
        }
        query
            .order_by_desc(seasons::Column::Year)
            .order_by_desc(seasons::Column::StartDate)
            .all(&self.db)
            .await
    }

    /// Finds a season by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<seasons::Model>, DbErr> {
        seasons::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a season.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a bad date range and `OrganizationNotFound`
    /// for a dangling organization.
    pub async fn create(&self, input: SeasonInput) -> Result<seasons::Model, SeasonError> {
        input.validate()?;
        check_organization(&self.db, input.organization_id).await?;

        let season = seasons::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            name: Set(input.name),
            season_type: Set(input.season_type.into()),
            year: Set(input.year),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            is_active: Set(input.is_active),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(season_id = %season.id, "Season created");
        Ok(season)
    }

    /// Replaces every editable field of a season.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist, plus the errors of
    /// [`Self::create`].
    pub async fn update(
        &self,
        id: Uuid,
        input: SeasonInput,
    ) -> Result<seasons::Model, SeasonError> {
        input.validate()?;

        let existing = self.find_by_id(id).await?.ok_or(SeasonError::NotFound(id))?;
        check_organization(&self.db, input.organization_id).await?;

        let mut season: seasons::ActiveModel = existing.into();
        season.organization_id = Set(input.organization_id);
        season.name = Set(input.name);
        season.season_type = Set(input.season_type.into());
        season.year = Set(input.year);
        season.start_date = Set(input.start_date);
        season.end_date = Set(input.end_date);
        season.is_active = Set(input.is_active);

        let season = season.update(&self.db).await?;
        info!(season_id = %season.id, "Season updated");
        Ok(season)
    }

    /// Deletes a season with its teams, budgets, expenses and revenues.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), SeasonError> {
        let txn = self.db.begin().await?;
        let deleted = cascade::delete_season(&txn, id).await?;
        if deleted == 0 {
            return Err(SeasonError::NotFound(id));
        }
        txn.commit().await?;

        info!(season_id = %id, "Season deleted");
        Ok(())
    }
}

async fn check_organization<C>(conn: &C, organization_id: Option<Uuid>) -> Result<(), SeasonError>
where
    C: ConnectionTrait,
{
    if let Some(org_id) = organization_id {
        organizations::Entity::find_by_id(org_id)
            .one(conn)
            .await?
            .ok_or(SeasonError::OrganizationNotFound(org_id))?;
    }
    Ok(())
}
