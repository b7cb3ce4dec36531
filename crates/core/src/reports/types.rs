//! Report data types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregation::{FinancialTotals, PlayerCostBreakdown};
use crate::category::{ExpenseCategory, RevenueCategory};

/// Season identity used as a report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonInfo {
    /// Season ID.
    pub id: Uuid,
    /// Season name.
    pub name: String,
    /// Owning organization.
    pub organization_id: Option<Uuid>,
}

/// Organization identity used as a report header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationInfo {
    /// Organization ID.
    pub id: Uuid,
    /// Organization name.
    pub name: String,
}

/// Budget summary for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonBudgetSummary {
    /// Season ID.
    pub season_id: Uuid,
    /// Season name.
    pub season_name: String,
    /// Headline totals.
    #[serde(flatten)]
    pub totals: FinancialTotals,
}

/// Budget summary for a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBudgetSummary {
    /// Team ID.
    pub team_id: Uuid,
    /// Team name.
    pub team_name: String,
    /// Season the team plays in.
    pub season_id: Uuid,
    /// Headline totals.
    #[serde(flatten)]
    pub totals: FinancialTotals,
    /// Players on the roster, as recorded on the team.
    pub player_count: i32,
    /// `player_count * registration_fee`.
    pub registration_fees_expected: Decimal,
    /// Fees actually paid by players.
    pub registration_fees_collected: Decimal,
}

/// Public-facing financial summary for a season or an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencyReport {
    /// Organization ID, when known.
    pub organization_id: Option<Uuid>,
    /// Organization name, when known.
    pub organization_name: Option<String>,
    /// Season ID, when the report covers one season.
    pub season_id: Option<Uuid>,
    /// Season name, when the report covers one season.
    pub season_name: Option<String>,
    /// Headline totals.
    #[serde(flatten)]
    pub totals: FinancialTotals,
    /// Expenses grouped by category.
    pub expenses_by_category: BTreeMap<ExpenseCategory, Decimal>,
    /// Revenues grouped by category.
    pub revenues_by_category: BTreeMap<RevenueCategory, Decimal>,
    /// Per-player costs for every team in scope.
    pub player_cost_breakdown: Vec<PlayerCostBreakdown>,
}
