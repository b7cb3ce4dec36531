//! Financial aggregation over budgets, expenses and revenues.
//!
//! Everything here works on records that have already been loaded and
//! filtered to one scope (a season, a team, or a set of seasons). The
//! repositories decide the scope; this module only does the arithmetic:
//! - Scope totals (budgeted, spent, raised, remaining, profit/loss)
//! - Category breakdowns
//! - Registration fee roll-ups
//! - Per-player cost breakdowns

pub mod service;
pub mod types;


pub use service::AggregationService;
pub use types::{
    ExpenseEntry, FinancialRecords, FinancialTotals, PlayerCostBreakdown, PlayerFee,
    RevenueEntry, TeamRoster,
};
