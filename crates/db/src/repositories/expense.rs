//! Expense repository for database operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use huddle_core::ExpenseCategory;
use huddle_core::validation::{self, ValidationError};

use super::reference::{self, ReferenceError};
use crate::entities::{expenses, sea_orm_active_enums};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// Expense not found.
    #[error("Expense not found: {0}")]
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

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Season.
    pub season_id: Uuid,
    /// Team, if the expense is team specific.
    pub team_id: Option<Uuid>,
    /// Category.
    pub category: ExpenseCategory,
    /// Description.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Vendor.
    pub vendor: Option<String>,
    /// Receipt number.
    pub receipt_number: Option<String>,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
    /// Recording user.
    pub created_by: Option<Uuid>,
}

impl CreateExpenseInput {
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        validation::required("description", &self.description)?;
        validation::money_amount("amount", self.amount)
    }

    pub(crate) fn into_active_model(self) -> expenses::ActiveModel {
        expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_id: Set(self.season_id),
            team_id: Set(self.team_id),
            category: Set(self.category.into()),
            description: Set(self.description),
            amount: Set(self.amount),
            vendor: Set(self.vendor),
            receipt_number: Set(self.receipt_number),
            payment_date: Set(self.payment_date),
            notes: Set(self.notes),
            created_by: Set(self.created_by),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}

/// Filter for listing expenses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpenseFilter {
    /// Only this season.
    pub season_id: Option<Uuid>,
    /// Only this team.
    pub team_id: Option<Uuid>,
    /// Only this category.
    pub category: Option<ExpenseCategory>,
}

/// Expense repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists expenses matching the filter, most recent payment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, filter: ExpenseFilter) -> Result<Vec<expenses::Model>, DbErr> {
        let mut query = expenses::Entity::find();
        if let Some(season_id) = filter.season_id {
            query = query.filter(expenses::Column::SeasonId.eq(season_id));
        }
        if let Some(team_id) = filter.team_id {
            query = query.filter(expenses::Column::TeamId.eq(team_id));
        }
        if let Some(category) = filter.category {
            let category: sea_orm_active_enums::ExpenseCategory = category.into();
            query = query.filter(expenses::Column::Category.eq(category));
        }
        query
            .order_by_desc(expenses::Column::PaymentDate)
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<expenses::Model>, DbErr> {
        expenses::Entity::find_by_id(id).one(&self.db).await
    }

    /// Records an expense.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a negative amount or blank description and
    /// `Reference` when the season or team is missing or mismatched.
    pub async fn create(&self, input: CreateExpenseInput) -> Result<expenses::Model, ExpenseError> {
        input.validate()?;
        reference::require_scope(&self.db, input.season_id, input.team_id).await?;

        let expense = input.into_active_model().insert(&self.db).await?;
        info!(
            expense_id = %expense.id,
            season_id = %expense.season_id,
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok(expense)
    }

    /// Deletes an expense.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the expense does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), ExpenseError> {
        let result = expenses::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ExpenseError::NotFound(id));
        }

        info!(expense_id = %id, "Expense deleted");
        Ok(())
    }
}
