//! Report assembly service.

use uuid::Uuid;

use super::error::ReportError;
use super::types::{
    OrganizationInfo, SeasonBudgetSummary, SeasonInfo, TeamBudgetSummary, TransparencyReport,
};
use crate::aggregation::{AggregationService, FinancialRecords, PlayerFee, TeamRoster};

/// Service for assembling reports from loaded records.
pub struct ReportService;

impl ReportService {
    /// Builds the budget summary for a season.
    ///
    /// `records` must already be filtered to the season.
    #[must_use]
    pub fn season_summary(season: &SeasonInfo, records: &FinancialRecords) -> SeasonBudgetSummary {
        SeasonBudgetSummary {
            season_id: season.id,
            season_name: season.name.clone(),
            totals: AggregationService::scope_totals(records),
        }
    }

    /// Builds the budget summary for a team.
    ///
    /// `records` must already be filtered to the team.
    #[must_use]
    pub fn team_summary(
        team: &TeamRoster,
        season_id: Uuid,
        records: &FinancialRecords,
        players: &[PlayerFee],
    ) -> TeamBudgetSummary {
        TeamBudgetSummary {
            team_id: team.id,
            team_name: team.name.clone(),
            season_id,
            totals: AggregationService::scope_totals(records),
            player_count: team.current_players,
            registration_fees_expected: AggregationService::expected_registration_fees(
                team.current_players,
                team.registration_fee,
            ),
            registration_fees_collected: AggregationService::collected_registration_fees(players),
        }
    }

    /// Builds the transparency report for a single season.
    #[must_use]
    pub fn season_transparency(
        organization: Option<&OrganizationInfo>,
        season: &SeasonInfo,
        records: &FinancialRecords,
        teams: &[TeamRoster],
        players: &[PlayerFee],
    ) -> TransparencyReport {
        let mut report = Self::transparency(organization, records, teams, players);
        report.season_id = Some(season.id);
        report.season_name = Some(season.name.clone());
        report
    }

    /// Picks the seasons an organization report covers.
    ///
    /// With a filter, only the matching season is kept.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoSeasons` when nothing is left to report on.
    pub fn select_seasons(
        organization_id: Uuid,
        seasons: Vec<SeasonInfo>,
        season_filter: Option<Uuid>,
    ) -> Result<Vec<SeasonInfo>, ReportError> {
        let selected: Vec<SeasonInfo> = seasons
            .into_iter()
            .filter(|s| season_filter.is_none_or(|id| s.id == id))
            .collect();

        if selected.is_empty() {
            return Err(ReportError::NoSeasons(organization_id));
        }
        Ok(selected)
    }

    /// Builds the transparency report across an organization's seasons.
    ///
    /// `seasons` is the output of [`Self::select_seasons`] and `records`,
    /// `teams` and `players` must cover exactly those seasons.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::NoSeasons` if `seasons` is empty.
    pub fn organization_transparency(
        organization: &OrganizationInfo,
        seasons: &[SeasonInfo],
        records: &FinancialRecords,
        teams: &[TeamRoster],
        players: &[PlayerFee],
    ) -> Result<TransparencyReport, ReportError> {
        if seasons.is_empty() {
            return Err(ReportError::NoSeasons(organization.id));
        }

        let mut report = Self::transparency(Some(organization), records, teams, players);
        if let [season] = seasons {
            report.season_id = Some(season.id);
            report.season_name = Some(season.name.clone());
        }
        Ok(report)
    }

    fn transparency(
        organization: Option<&OrganizationInfo>,
        records: &FinancialRecords,
        teams: &[TeamRoster],
        players: &[PlayerFee],
    ) -> TransparencyReport {
        let player_cost_breakdown = teams
            .iter()
            .map(|team| AggregationService::player_cost_breakdown(team, &records.expenses, players))
            .collect();

        TransparencyReport {
            organization_id: organization.map(|o| o.id),
            organization_name: organization.map(|o| o.name.clone()),
            season_id: None,
            season_name: None,
            totals: AggregationService::scope_totals(records),
            expenses_by_category: AggregationService::expenses_by_category(&records.expenses),
            revenues_by_category: AggregationService::revenues_by_category(&records.revenues),
            player_cost_breakdown,
        }
    }
}
