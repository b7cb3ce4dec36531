//! Quick actions: bulk registration fees and one-step team expenses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use huddle_core::validation::{self, ValidationError};
use huddle_core::{ExpenseCategory, RevenueCategory, quick_entry};

use super::expense::CreateExpenseInput;
use super::reference::{self, ReferenceError};
use super::revenue::CreateRevenueInput;
use crate::entities::{expenses, revenues, teams};

/// Error types for quick actions.
#[derive(Debug, thiserror::Error)]
pub enum QuickEntryError {
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

/// Input for recording registration fees for a whole team at once.
#[derive(Debug, Clone)]
pub struct BulkRegistrationInput {
    /// Team.
    pub team_id: Uuid,
    /// Players registered.
    pub player_count: i32,
    /// Fee each player paid.
    pub fee_per_player: Decimal,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
    /// Recording user.
    pub created_by: Option<Uuid>,
}

/// Outcome of a bulk registration.
#[derive(Debug, Clone)]
pub struct BulkRegistrationOutcome {
    /// The revenue created.
    pub revenue: revenues::Model,
    /// `player_count * fee_per_player`.
    pub total_amount: Decimal,
}

/// Input for a quick team expense.
#[derive(Debug, Clone)]
pub struct QuickExpenseInput {
    /// Season.
    pub season_id: Uuid,
    /// Team.
    pub team_id: Uuid,
    /// Category.
    pub category: ExpenseCategory,
    /// Amount paid.
    pub amount: Decimal,
    /// Description, suffixed with the per-player split when one applies.
    pub description: String,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Players to split the cost across.
    pub player_count: Option<i32>,
    /// Recording user.
    pub created_by: Option<Uuid>,
}

/// Outcome of a quick expense.
#[derive(Debug, Clone)]
pub struct QuickExpenseOutcome {
    /// The expense created.
    pub expense: expenses::Model,
    /// Per-player share, when a positive player count was given.
    pub per_player_cost: Option<Decimal>,
}

/// Repository for the quick-action shortcuts.
#[derive(Debug, Clone)]
pub struct QuickEntryRepository {
    db: DatabaseConnection,
}

impl QuickEntryRepository {
    /// Creates a new quick-entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books one registration-fee revenue for a team and updates the team's
    /// roster size and fee, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `Reference` for a missing team and `Validation` for a
    /// negative count, a bad fee or a total too large to store.
    pub async fn bulk_registration_fees(
        &self,
        input: BulkRegistrationInput,
    ) -> Result<BulkRegistrationOutcome, QuickEntryError> {
        validation::non_negative_count("player_count", input.player_count)?;
        validation::money_amount("fee_per_player", input.fee_per_player)?;
        let total_amount = quick_entry::bulk_fee_total(input.player_count, input.fee_per_player)?;

        let txn = self.db.begin().await?;
        let team = reference::require_team(&txn, input.team_id).await?;
        let revenue = CreateRevenueInput {
            season_id: team.season_id,
            team_id: Some(team.id),
            category: RevenueCategory::RegistrationFees,
            description: quick_entry::bulk_fee_description(
                input.player_count,
                input.fee_per_player,
            ),
            amount: total_amount,
            source: None,
            payment_date: input.payment_date,
            notes: input.notes,
            created_by: input.created_by,
        }
        .into_active_model()
        .insert(&txn)
        .await?;

        let mut team: teams::ActiveModel = team.into();
        team.current_players = Set(input.player_count);
        team.registration_fee = Set(input.fee_per_player);
        team.update(&txn).await?;

        txn.commit().await?;

        info!(
            revenue_id = %revenue.id,
            team_id = %input.team_id,
            players = input.player_count,
            total = %total_amount,
            "Bulk registration fees recorded"
        );
        Ok(BulkRegistrationOutcome {
            revenue,
            total_amount,
        })
    }

    /// Records a team expense, optionally noting the per-player split in
    /// its description.
    ///
    /// # Errors
    ///
    /// Returns `Reference` when the season or team is missing or the team
    /// plays in another season, and `Validation` for bad amounts.
    pub async fn quick_expense(
        &self,
        input: QuickExpenseInput,
    ) -> Result<QuickExpenseOutcome, QuickEntryError> {
        let per_player_cost = quick_entry::per_player_cost(input.amount, input.player_count);
        let description = quick_entry::quick_expense_description(
            &input.description,
            input.player_count,
            per_player_cost,
        );

        let expense = CreateExpenseInput {
            season_id: input.season_id,
            team_id: Some(input.team_id),
            category: input.category,
            description,
            amount: input.amount,
            vendor: None,
            receipt_number: None,
            payment_date: input.payment_date,
            notes: None,
            created_by: input.created_by,
        };
        expense.validate()?;
        reference::require_scope(&self.db, input.season_id, Some(input.team_id)).await?;

        let expense = expense.into_active_model().insert(&self.db).await?;
        info!(expense_id = %expense.id, team_id = %input.team_id, "Quick expense recorded");

        Ok(QuickExpenseOutcome {
            expense,
            per_player_cost,
        })
    }
}
