//! Revenue repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::RevenueCategory;
use huddle_core::validation::{self, ValidationError};

use super::reference::{self, ReferenceError};
use crate::entities::{revenues, sea_orm_active_enums};

/// Error types for revenue operations.
#[derive(Debug, thiserror::Error)]
pub enum RevenueError {
    /// Revenue not found.
    #[error("Revenue not found: {0}")]
    NotFound(Uuid),

    /// Season or team missing or mismatched.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording a revenue.
#[derive(Debug, Clone)]
pub struct CreateRevenueInput {
    /// Season.
    pub season_id: Uuid,
    /// Team, if the revenue is team specific.
    pub team_id: Option<Uuid>,
    /// Category.
    pub category: RevenueCategory,
    /// Description.
    pub description: String,
    /// Amount received.
    pub amount: Decimal,
    /// Source, e.g. the sponsor.
    pub source: Option<String>,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
    /// Recording user.
    pub created_by: Option<Uuid>,
}

impl CreateRevenueInput {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validation::required("description", &self.description)?;
        validation::money_amount("amount", self.amount)
    }

    pub(crate) fn into_active_model(self) -> revenues::ActiveModel {
        revenues::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_id: Set(self.season_id),
            team_id: Set(self.team_id),
            category: Set(self.category.into()),
            description: Set(self.description),
            amount: Set(self.amount),
            source: Set(self.source),
            payment_date: Set(self.payment_date),
            notes: Set(self.notes),
            created_by: Set(self.created_by),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Filter for listing revenues.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueFilter {
    /// Only this season.
    pub season_id: Option<Uuid>,
    /// Only this team.
    pub team_id: Option<Uuid>,
    /// Only this category.
    pub category: Option<RevenueCategory>,
}

/// Revenue repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct RevenueRepository {
    db: DatabaseConnection,
}

impl RevenueRepository {
    /// Creates a new revenue repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists revenues matching the filter, most recent payment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: RevenueFilter) -> Result<Vec<revenues::Model>, DbErr> {
        let mut query = revenues::Entity::find();
        if let Some(season_id) = filter.season_id {
            query = query.filter(revenues::Column::SeasonId.eq(season_id));
        }
        if let Some(team_id) = filter.team_id {
            query = query.filter(revenues::Column::TeamId.eq(team_id));
        }
        if let Some(category) = filter.category {
            let category: sea_orm_active_enums::RevenueCategory = category.into();
            query = query.filter(revenues::Column::Category.eq(category));
        }
        query
            .order_by_desc(revenues::Column::PaymentDate)
            .order_by_desc(revenues::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a revenue by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<revenues::Model>, DbErr> {
        revenues::Entity::find_by_id(id).one(&self.db).await
    }

    /// Records a revenue.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a negative amount or blank description and
    /// `Reference` when the season or team is missing or mismatched.
    pub async fn create(&self, input: CreateRevenueInput) -> Result<revenues::Model, RevenueError> {
        input.validate()?;
        reference::require_scope(&self.db, input.season_id, input.team_id).await?;

        let revenue = input.into_active_model().insert(&self.db).await?;
        info!(
            revenue_id = %revenue.id,
            season_id = %revenue.season_id,
            amount = %revenue.amount,
            "Revenue recorded"
        );
        Ok(revenue)
    }

    /// Deletes a revenue.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the revenue does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), RevenueError> {
        let result = revenues::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RevenueError::NotFound(id));
        }

        info!(revenue_id = %id, "Revenue deleted");
        Ok(())
    }
}
