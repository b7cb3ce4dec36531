//! Budget repository for budget database operations.
//!
//! Summaries over budgets live in [`super::report::ReportRepository`].

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::validation::{self, ValidationError};

use super::reference::{self, ReferenceError};
use crate::entities::budgets;

/// Error types for budget operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
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

/// Input for creating a budget line.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Season.
    pub season_id: Uuid,
    /// Team, or `None` for a season-wide budget.
    pub team_id: Option<Uuid>,
    /// Free-text category.
    pub category: String,
    /// Planned amount.
    pub budgeted_amount: Decimal,
    /// Notes.
    pub notes: Option<String>,
}

/// Filter for listing budgets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetFilter {
    /// Only this season.
    pub season_id: Option<Uuid>,
    /// Only this team.
    pub team_id: Option<Uuid>,
}

/// Budget repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists budgets matching the filter, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: BudgetFilter) -> Result<Vec<budgets::Model>, DbErr> {
        let mut query = budgets::Entity::find();
        if let Some(season_id) = filter.season_id {
            query = query.filter(budgets::Column::SeasonId.eq(season_id));
        }
        if let Some(team_id) = filter.team_id {
            query = query.filter(budgets::Column::TeamId.eq(team_id));
        }
        query
            .order_by_asc(budgets::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<budgets::Model>, DbErr> {
        budgets::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a budget line.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a negative amount or blank category and
    /// `Reference` when the season or team is missing or mismatched.
    pub async fn create(&self, input: CreateBudgetInput) -> Result<budgets::Model, BudgetError> {
        validation::required("category", &input.category)?;
        validation::money_amount("budgeted_amount", input.budgeted_amount)?;
        reference::require_scope(&self.db, input.season_id, input.team_id).await?;

        let budget = budgets::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_id: Set(input.season_id),
            team_id: Set(input.team_id),
            category: Set(input.category.trim().to_string()),
            budgeted_amount: Set(input.budgeted_amount),
            notes: Set(input.notes),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        }
        .insert(&self.db)
        .await?;

        info!(budget_id = %budget.id, season_id = %budget.season_id, "Budget created");
        Ok(budget)
    }

    /// Deletes a budget.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the budget does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), BudgetError> {
        let result = budgets::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(BudgetError::NotFound(id));
        }

        info!(budget_id = %id, "Budget deleted");
        Ok(())
    }
}
