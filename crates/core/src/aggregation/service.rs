//! Aggregation service.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::types::{
    ExpenseEntry, FinancialRecords, FinancialTotals, PlayerCostBreakdown, PlayerFee,
    RevenueEntry, TeamRoster,
};
use crate::category::{ExpenseCategory, RevenueCategory};
use crate::validation::MONEY_SCALE;

/// Service for financial aggregation.
pub struct AggregationService;

impl AggregationService {
    /// Sums a sequence of amounts. An empty sequence sums to zero.
    #[must_use]
    pub fn sum_amounts<I>(amounts: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        amounts.into_iter().sum()
    }

    /// Derives remaining budget and profit/loss from the three sums.
    #[must_use]
    pub fn totals(
        total_budgeted: Decimal,
        total_expenses: Decimal,
        total_revenue: Decimal,
    ) -> FinancialTotals {
        FinancialTotals {
            total_budgeted,
            total_expenses,
            total_revenue,
            remaining_budget: total_budgeted - total_expenses,
            profit_loss: total_revenue - total_expenses,
        }
    }

    /// Computes the headline totals for one scope.
    #[must_use]
    pub fn scope_totals(records: &FinancialRecords) -> FinancialTotals {
        Self::totals(
            Self::sum_amounts(records.budgets.iter().copied()),
            Self::sum_amounts(records.expenses.iter().map(|e| e.amount)),
            Self::sum_amounts(records.revenues.iter().map(|r| r.amount)),
        )
    }

    /// Groups expenses by category. Categories with no rows are omitted.
    #[must_use]
    pub fn expenses_by_category(expenses: &[ExpenseEntry]) -> BTreeMap<ExpenseCategory, Decimal> {
        group_by_category(expenses.iter().map(|e| (e.category, e.amount)))
    }

    /// Groups revenues by category. Categories with no rows are omitted.
    #[must_use]
    pub fn revenues_by_category(revenues: &[RevenueEntry]) -> BTreeMap<RevenueCategory, Decimal> {
        group_by_category(revenues.iter().map(|r| (r.category, r.amount)))
    }

    /// The divisor for per-player figures. Empty rosters count as one player.
    #[must_use]
    pub const fn effective_player_count(current_players: i32) -> i32 {
        if current_players > 0 { current_players } else { 1 }
    }

    /// Registration fees actually paid by players.
    #[must_use]
    pub fn collected_registration_fees(players: &[PlayerFee]) -> Decimal {
        Self::sum_amounts(players.iter().filter(|p| p.paid).map(|p| p.amount))
    }

    /// Registration fees the roster should bring in at the team's rate.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn expected_registration_fees(current_players: i32, registration_fee: Decimal) -> Decimal {
        Decimal::from(current_players.max(0)).saturating_mul(registration_fee)
    }

    /// `amount / count` rounded to cents.
    #[must_use]
    pub fn per_player(amount: Decimal, count: i32) -> Decimal {
        (amount / Decimal::from(Self::effective_player_count(count))).round_dp(MONEY_SCALE)
    }

    /// Builds the per-player cost breakdown for one team.
    ///
    /// `expenses` and `players` may cover more than this team; rows for other
    /// teams are ignored.
    #[must_use]
    pub fn player_cost_breakdown(
        team: &TeamRoster,
        expenses: &[ExpenseEntry],
        players: &[PlayerFee],
    ) -> PlayerCostBreakdown {
        let team_expenses: Vec<ExpenseEntry> = expenses
            .iter()
            .filter(|e| e.team_id == Some(team.id))
            .cloned()
            .collect();
        let team_players: Vec<PlayerFee> = players
            .iter()
            .filter(|p| p.team_id == team.id)
            .cloned()
            .collect();

        let total_cost = Self::sum_amounts(team_expenses.iter().map(|e| e.amount));
        let player_count = Self::effective_player_count(team.current_players);
        let registration_fee = Self::collected_registration_fees(&team_players);

        PlayerCostBreakdown {
            team_id: team.id,
            team_name: team.name.clone(),
            player_count,
            total_cost,
            cost_per_player: Self::per_player(total_cost, player_count),
            registration_fee,
            other_costs: total_cost - registration_fee,
            breakdown_by_category: Self::expenses_by_category(&team_expenses),
        }
    }
}

fn group_by_category<C, I>(rows: I) -> BTreeMap<C, Decimal>
where
    C: Ord,
    I: IntoIterator<Item = (C, Decimal)>,
{
    let mut grouped = BTreeMap::new();
    for (category, amount) in rows {
        *grouped.entry(category).or_insert(Decimal::ZERO) += amount;
    }
    grouped
}
