//! Report repository for budget summaries and transparency reports.
//!
//! Each report loads its records inside one transaction and hands them to
//! [`huddle_core::reports::ReportService`]. Nothing is cached.

use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use huddle_core::aggregation::{
    AggregationService, ExpenseEntry, FinancialRecords, PlayerCostBreakdown, PlayerFee,
    RevenueEntry, TeamRoster,
};
use huddle_core::reports::{
    OrganizationInfo, ReportError as LookupError, ReportService, SeasonBudgetSummary, SeasonInfo,
    TeamBudgetSummary, TransparencyReport,
};

use crate::entities::{budgets, expenses, organizations, players, revenues, seasons, teams};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The season, team or organization being reported on does not exist.
    #[error(transparent)]
    NotFound(#[from] LookupError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Which rows a load should cover.
#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    Seasons(&'a [Uuid]),
    Team(Uuid),
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Budget summary for a season.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist.
    pub async fn season_summary(
        &self,
        season_id: Uuid,
    ) -> Result<SeasonBudgetSummary, ReportError> {
        let txn = self.db.begin().await?;
        let season = load_season(&txn, season_id).await?;
        let records = load_records(&txn, Scope::Seasons(&[season_id])).await?;
        txn.commit().await?;

        Ok(ReportService::season_summary(&season_info(&season), &records))
    }

    /// Budget summary for a team.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub async fn team_summary(&self, team_id: Uuid) -> Result<TeamBudgetSummary, ReportError> {
        let txn = self.db.begin().await?;
        let team = load_team(&txn, team_id).await?;
        let records = load_records(&txn, Scope::Team(team_id)).await?;
        let players = load_player_fees(&txn, &[team_id]).await?;
        txn.commit().await?;

        Ok(ReportService::team_summary(
            &team_roster(&team),
            team.season_id,
            &records,
            &players,
        ))
    }

    /// Per-player cost breakdown for a team.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the team does not exist.
    pub async fn team_player_costs(
        &self,
        team_id: Uuid,
    ) -> Result<PlayerCostBreakdown, ReportError> {
        let txn = self.db.begin().await?;
        let team = load_team(&txn, team_id).await?;
        let records = load_records(&txn, Scope::Team(team_id)).await?;
        let players = load_player_fees(&txn, &[team_id]).await?;
        txn.commit().await?;

        Ok(AggregationService::player_cost_breakdown(
            &team_roster(&team),
            &records.expenses,
            &players,
        ))
    }

    /// Transparency report for one season.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the season does not exist.
    pub async fn season_transparency(
        &self,
        season_id: Uuid,
    ) -> Result<TransparencyReport, ReportError> {
        let txn = self.db.begin().await?;
        let season = load_season(&txn, season_id).await?;
        let organization = match season.organization_id {
            Some(org_id) => organizations::Entity::find_by_id(org_id).one(&txn).await?,
            None => None,
        };
        let season_ids = [season_id];
        let records = load_records(&txn, Scope::Seasons(&season_ids)).await?;
        let (teams, players) = load_rosters(&txn, &season_ids).await?;
        txn.commit().await?;

        Ok(ReportService::season_transparency(
            organization.as_ref().map(organization_info).as_ref(),
            &season_info(&season),
            &records,
            &teams,
            &players,
        ))
    }

    /// Transparency report across an organization's seasons, optionally
    /// narrowed to one season.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the organization does not exist or no season
    /// matches.
    pub async fn organization_transparency(
        &self,
        organization_id: Uuid,
        season_filter: Option<Uuid>,
    ) -> Result<TransparencyReport, ReportError> {
        let txn = self.db.begin().await?;
        let organization = organizations::Entity::find_by_id(organization_id)
            .one(&txn)
            .await?
            .ok_or(LookupError::OrganizationNotFound(organization_id))?;

        let seasons: Vec<SeasonInfo> = seasons::Entity::find()
            .filter(seasons::Column::OrganizationId.eq(organization_id))
            .order_by_desc(seasons::Column::StartDate)
            .all(&txn)
            .await?
            .iter()
            .map(season_info)
            .collect();
        let seasons = ReportService::select_seasons(organization_id, seasons, season_filter)?;

        let season_ids: Vec<Uuid> = seasons.iter().map(|s| s.id).collect();
        let records = load_records(&txn, Scope::Seasons(&season_ids)).await?;
        let (teams, players) = load_rosters(&txn, &season_ids).await?;
        txn.commit().await?;

        Ok(ReportService::organization_transparency(
            &organization_info(&organization),
            &seasons,
            &records,
            &teams,
            &players,
        )?)
    }
}

// ============================================================================
// Loading
// ============================================================================

async fn load_season<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<seasons::Model, ReportError> {
    Ok(seasons::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(LookupError::SeasonNotFound(id))?)
}

async fn load_team<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<teams::Model, ReportError> {
    Ok(teams::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(LookupError::TeamNotFound(id))?)
}

async fn load_records<C: ConnectionTrait>(
    conn: &C,
    scope: Scope<'_>,
) -> Result<FinancialRecords, DbErr> {
    let (budget_query, expense_query, revenue_query) = match scope {
        Scope::Seasons(ids) => (
            budgets::Entity::find().filter(budgets::Column::SeasonId.is_in(ids.iter().copied())),
            expenses::Entity::find().filter(expenses::Column::SeasonId.is_in(ids.iter().copied())),
            revenues::Entity::find().filter(revenues::Column::SeasonId.is_in(ids.iter().copied())),
        ),
        Scope::Team(id) => (
            budgets::Entity::find().filter(budgets::Column::TeamId.eq(id)),
            expenses::Entity::find().filter(expenses::Column::TeamId.eq(id)),
            revenues::Entity::find().filter(revenues::Column::TeamId.eq(id)),
        ),
    };

    let budgets = budget_query
        .all(conn)
        .await?
        .into_iter()
        .map(|b| b.budgeted_amount)
        .collect();
    let expenses = expense_query
        .all(conn)
        .await?
        .into_iter()
        .map(|e| ExpenseEntry {
            team_id: e.team_id,
            category: e.category.into(),
            amount: e.amount,
        })
        .collect();
    let revenues = revenue_query
        .all(conn)
        .await?
        .into_iter()
        .map(|r| RevenueEntry {
            team_id: r.team_id,
            category: r.category.into(),
            amount: r.amount,
        })
        .collect();

    Ok(FinancialRecords {
        budgets,
        expenses,
        revenues,
    })
}

async fn load_rosters<C: ConnectionTrait>(
    conn: &C,
    season_ids: &[Uuid],
) -> Result<(Vec<TeamRoster>, Vec<PlayerFee>), DbErr> {
    let teams: Vec<TeamRoster> = teams::Entity::find()
        .filter(teams::Column::SeasonId.is_in(season_ids.iter().copied()))
        .order_by_asc(teams::Column::Name)
        .all(conn)
        .await?
        .iter()
        .map(team_roster)
        .collect();

    let team_ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();
    let players = load_player_fees(conn, &team_ids).await?;
    Ok((teams, players))
}

async fn load_player_fees<C: ConnectionTrait>(
    conn: &C,
    team_ids: &[Uuid],
) -> Result<Vec<PlayerFee>, DbErr> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(players::Entity::find()
        .filter(players::Column::TeamId.is_in(team_ids.iter().copied()))
        .all(conn)
        .await?
        .into_iter()
        .map(|p| PlayerFee {
            team_id: p.team_id,
            paid: p.registration_fee_paid,
            amount: p.registration_fee_amount,
        })
        .collect())
}

// ============================================================================
// Conversions
// ============================================================================

fn season_info(season: &seasons::Model) -> SeasonInfo {
    SeasonInfo {
        id: season.id,
        name: season.name.clone(),
        organization_id: season.organization_id,
    }
}

fn organization_info(org: &organizations::Model) -> OrganizationInfo {
    OrganizationInfo {
        id: org.id,
        name: org.name.clone(),
    }
}

fn team_roster(team: &teams::Model) -> TeamRoster {
    TeamRoster {
        id: team.id,
        name: team.name.clone(),
        current_players: team.current_players,
        registration_fee: team.registration_fee,
    }
}
