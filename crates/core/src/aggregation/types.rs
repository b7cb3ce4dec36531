//! Aggregation input and output types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::{ExpenseCategory, RevenueCategory};

/// An expense reduced to what aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseEntry {
    /// Team the expense was booked against, if any.
    pub team_id: Option<Uuid>,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Amount spent.
    pub amount: Decimal,
}

/// A revenue reduced to what aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueEntry {
    /// Team the revenue was booked against, if any.
    pub team_id: Option<Uuid>,
    /// Revenue category.
    pub category: RevenueCategory,
    /// Amount received.
    pub amount: Decimal,
}

/// Team fields used for fee and per-player calculations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRoster {
    /// Team ID.
    pub id: Uuid,
    /// Team name.
    pub name: String,
    /// Players currently on the roster.
    pub current_players: i32,
    /// Registration fee charged per player.
    pub registration_fee: Decimal,
}

/// A player's registration fee status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFee {
    /// Team the player belongs to.
    pub team_id: Uuid,
    /// Whether the fee has been paid.
    pub paid: bool,
    /// Fee amount recorded for the player.
    pub amount: Decimal,
}

/// All money records for one reporting scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinancialRecords {
    /// Budgeted amounts.
    pub budgets: Vec<Decimal>,
    /// Expenses.
    pub expenses: Vec<ExpenseEntry>,
    /// Revenues.
    pub revenues: Vec<RevenueEntry>,
}

/// The five headline numbers of every summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTotals {
    /// Sum of budgeted amounts.
    pub total_budgeted: Decimal,
    /// Sum of expenses.
    pub total_expenses: Decimal,
    /// Sum of revenues.
    pub total_revenue: Decimal,
    /// `total_budgeted - total_expenses`.
    pub remaining_budget: Decimal,
    /// `total_revenue - total_expenses`.
    pub profit_loss: Decimal,
}

/// What each player on a team costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCostBreakdown {
    /// Team ID.
    pub team_id: Uuid,
    /// Team name.
    pub team_name: String,
    /// Divisor used for per-player figures (never zero).
    pub player_count: i32,
    /// Sum of the team's expenses.
    pub total_cost: Decimal,
    /// `total_cost / player_count`, rounded to cents.
    pub cost_per_player: Decimal,
    /// Registration fees actually collected from players.
    pub registration_fee: Decimal,
    /// `total_cost - registration_fee`.
    pub other_costs: Decimal,
    /// The team's expenses grouped by category.
    pub breakdown_by_category: BTreeMap<ExpenseCategory, Decimal>,
}
