//! Bulk CSV import of parsed rows.
//!
//! Rows arrive already parsed by [`huddle_core::import`]. This repository
//! checks each row's references against stored data, then inserts the
//! survivors in fixed-size batches. Every batch commits on its own, so a
//! failing batch leaves the earlier ones in place.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Set,
    TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

use huddle_core::import::{
    ExpenseRow, ImportEntity, ImportSummary, OrganizationRow, ParsedImport, RevenueRow, RowError,
    SeasonRow, TeamRow,
};

use super::expense::CreateExpenseInput;
use super::organization::CreateOrganizationInput;
use super::reference::ReferenceError;
use super::revenue::CreateRevenueInput;
use crate::entities::{organizations, seasons, teams, users};

/// Rows per batch when no size is configured.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Error types for import operations. Row problems are not errors; they
/// are reported in the [`ImportSummary`].
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// A batch insert failed. Earlier batches stay committed.
    #[error("Import batch {batch} failed after {created} rows were created: {source}")]
    BatchFailed {
        /// One-based batch number.
        batch: usize,
        /// Rows committed by earlier batches.
        created: usize,
        /// Underlying failure.
        #[source]
        source: DbErr,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Import repository.
#[derive(Debug, Clone)]
pub struct ImportRepository {
    db: DatabaseConnection,
    batch_size: usize,
}

impl ImportRepository {
    /// Creates a new import repository. A zero batch size is treated as one.
    #[must_use]
    pub fn new(db: DatabaseConnection, batch_size: usize) -> Self {
        Self {
            db,
            batch_size: batch_size.max(1),
        }
    }

    /// Imports organizations.
    ///
    /// # Errors
    ///
    /// Returns `BatchFailed` if an insert batch fails.
    pub async fn import_organizations(
        &self,
        parsed: ParsedImport<OrganizationRow>,
    ) -> Result<ImportSummary, ImportError> {
        let models = parsed
            .rows
            .into_iter()
            .map(|row| {
                let row = row.record;
                CreateOrganizationInput {
                    name: row.name,
                    description: row.description,
                    website: row.website,
                    contact_email: row.contact_email,
                    contact_phone: row.contact_phone,
                    is_public: row.is_public,
                }
                .into_active_model()
            })
            .collect();

        self.finish(ImportEntity::Organizations, models, parsed.errors)
            .await
    }

    /// Imports seasons. Rows naming an unknown organization are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BatchFailed` if an insert batch fails.
    pub async fn import_seasons(
        &self,
        parsed: ParsedImport<SeasonRow>,
    ) -> Result<ImportSummary, ImportError> {
        let mut cache = ReferenceCache::default();
        let mut errors = parsed.errors;
        let mut models = Vec::with_capacity(parsed.rows.len());

        for row in parsed.rows {
            let record = row.record;
            if let Some(org_id) = record.organization_id
                && !cache.organization_exists(&self.db, org_id).await?
            {
                errors.push(RowError {
                    row: row.row,
                    message: format!("Organization not found: {org_id}"),
                });
                continue;
            }

            models.push(seasons::ActiveModel {
                id: Set(Uuid::new_v4()),
                organization_id: Set(record.organization_id),
                name: Set(record.name),
                season_type: Set(record.season_type.into()),
                year: Set(record.year),
                start_date: Set(record.start_date),
                end_date: Set(record.end_date),
                is_active: Set(record.is_active),
                created_at: Set(chrono::Utc::now().into()),
            });
        }

        self.finish(ImportEntity::Seasons, models, errors).await
    }

    /// Imports teams. Rows naming an unknown season or coach are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BatchFailed` if an insert batch fails.
    pub async fn import_teams(
        &self,
        parsed: ParsedImport<TeamRow>,
    ) -> Result<ImportSummary, ImportError> {
        let mut cache = ReferenceCache::default();
        let mut errors = parsed.errors;
        let mut models = Vec::with_capacity(parsed.rows.len());

        for row in parsed.rows {
            let record = row.record;
            if let Err(problem) = cache.check_scope(&self.db, record.season_id, None).await {
                errors.push(row_error(row.row, problem)?);
                continue;
            }
            if let Some(coach_id) = record.coach_id
                && !cache.user_exists(&self.db, coach_id).await?
            {
                errors.push(RowError {
                    row: row.row,
                    message: format!("Coach not found: {coach_id}"),
                });
                continue;
            }

            models.push(teams::ActiveModel {
                id: Set(Uuid::new_v4()),
                season_id: Set(record.season_id),
                name: Set(record.name),
                age_group: Set(record.age_group),
                sport: Set(record.sport),
                gender: Set(record.gender),
                coach_id: Set(record.coach_id),
                max_players: Set(record.max_players),
                current_players: Set(0),
                registration_fee: Set(record.registration_fee),
                created_at: Set(chrono::Utc::now().into()),
            });
        }

        self.finish(ImportEntity::Teams, models, errors).await
    }

    /// Imports expenses. Rows with an unknown season or team, or a team
    /// from another season, are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BatchFailed` if an insert batch fails.
    pub async fn import_expenses(
        &self,
        parsed: ParsedImport<ExpenseRow>,
        created_by: Option<Uuid>,
    ) -> Result<ImportSummary, ImportError> {
        let mut cache = ReferenceCache::default();
        let mut errors = parsed.errors;
        let mut models = Vec::with_capacity(parsed.rows.len());

        for row in parsed.rows {
            let record = row.record;
            if let Err(problem) = cache
                .check_scope(&self.db, record.season_id, record.team_id)
                .await
            {
                errors.push(row_error(row.row, problem)?);
                continue;
            }

            models.push(
                CreateExpenseInput {
                    season_id: record.season_id,
                    team_id: record.team_id,
                    category: record.category,
                    description: record.description,
                    amount: record.amount,
                    vendor: record.vendor,
                    receipt_number: record.receipt_number,
                    payment_date: record.payment_date,
                    notes: record.notes,
                    created_by,
                }
                .into_active_model(),
            );
        }

        self.finish(ImportEntity::Expenses, models, errors).await
    }

    /// Imports revenues, with the same reference checks as expenses.
    ///
    /// # Errors
    ///
    /// Returns `BatchFailed` if an insert batch fails.
    pub async fn import_revenues(
        &self,
        parsed: ParsedImport<RevenueRow>,
        created_by: Option<Uuid>,
    ) -> Result<ImportSummary, ImportError> {
        let mut cache = ReferenceCache::default();
        let mut errors = parsed.errors;
        let mut models = Vec::with_capacity(parsed.rows.len());

        for row in parsed.rows {
            let record = row.record;
            if let Err(problem) = cache
                .check_scope(&self.db, record.season_id, record.team_id)
                .await
            {
                errors.push(row_error(row.row, problem)?);
                continue;
            }

            models.push(
                CreateRevenueInput {
                    season_id: record.season_id,
                    team_id: record.team_id,
                    category: record.category,
                    description: record.description,
                    amount: record.amount,
                    source: record.source,
                    payment_date: record.payment_date,
                    notes: record.notes,
                    created_by,
                }
                .into_active_model(),
            );
        }

        self.finish(ImportEntity::Revenues, models, errors).await
    }

    async fn finish<A>(
        &self,
        entity: ImportEntity,
        models: Vec<A>,
        errors: Vec<RowError>,
    ) -> Result<ImportSummary, ImportError>
    where
        A: ActiveModelTrait + Send,
    {
        let created = self.insert_in_batches(entity, models).await?;
        info!(
            entity = entity.as_str(),
            created,
            skipped = errors.len(),
            "CSV import finished"
        );
        Ok(ImportSummary::new(entity, created, errors))
    }

    async fn insert_in_batches<A>(
        &self,
        entity: ImportEntity,
        models: Vec<A>,
    ) -> Result<usize, ImportError>
    where
        A: ActiveModelTrait + Send,
    {
        let mut created = 0;
        let mut remaining = models.into_iter().peekable();
        let mut batch = 0;

        while remaining.peek().is_some() {
            batch += 1;
            let chunk: Vec<A> = remaining.by_ref().take(self.batch_size).collect();
            let size = chunk.len();

            let txn = self.db.begin().await?;
            if let Err(source) = A::Entity::insert_many(chunk).exec(&txn).await {
                return Err(ImportError::BatchFailed {
                    batch,
                    created,
                    source,
                });
            }
            txn.commit().await?;

            created += size;
            debug!(entity = entity.as_str(), batch, rows = size, "Import batch committed");
        }

        Ok(created)
    }
}

/// Turns a reference problem into a row error, passing database failures up.
fn row_error(row: usize, problem: ReferenceError) -> Result<RowError, DbErr> {
    match problem {
        ReferenceError::Database(e) => Err(e),
        other => Ok(RowError {
            row,
            message: other.to_string(),
        }),
    }
}

/// Remembers lookups for the duration of one import.
#[derive(Debug, Default)]
struct ReferenceCache {
    organizations: HashMap<Uuid, bool>,
    users: HashMap<Uuid, bool>,
    seasons: HashMap<Uuid, bool>,
    // team -> season, `None` when the team does not exist
    teams: HashMap<Uuid, Option<Uuid>>,
}

impl ReferenceCache {
    async fn organization_exists<C>(&mut self, conn: &C, id: Uuid) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(found) = self.organizations.get(&id) {
            return Ok(*found);
        }
        let found = organizations::Entity::find_by_id(id).one(conn).await?.is_some();
        self.organizations.insert(id, found);
        Ok(found)
    }

    async fn user_exists<C>(&mut self, conn: &C, id: Uuid) -> Result<bool, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(found) = self.users.get(&id) {
            return Ok(*found);
        }
        let found = users::Entity::find_by_id(id).one(conn).await?.is_some();
        self.users.insert(id, found);
        Ok(found)
    }

    async fn check_scope<C>(
        &mut self,
        conn: &C,
        season_id: Uuid,
        team_id: Option<Uuid>,
    ) -> Result<(), ReferenceError>
    where
        C: ConnectionTrait,
    {
        let season_found = match self.seasons.get(&season_id) {
            Some(found) => *found,
            None => {
                let found = seasons::Entity::find_by_id(season_id)
                    .one(conn)
                    .await?
                    .is_some();
                self.seasons.insert(season_id, found);
                found
            }
        };
        if !season_found {
            return Err(ReferenceError::SeasonNotFound(season_id));
        }

        let Some(team_id) = team_id else {
            return Ok(());
        };
        let team_season = match self.teams.get(&team_id) {
            Some(season) => *season,
            None => {
                let season = teams::Entity::find_by_id(team_id)
                    .one(conn)
                    .await?
                    .map(|t| t.season_id);
                self.teams.insert(team_id, season);
                season
            }
        };
        match team_season {
            None => Err(ReferenceError::TeamNotFound(team_id)),
            Some(id) if id != season_id => {
                Err(ReferenceError::TeamNotInSeason { team_id, season_id })
            }
            Some(_) => Ok(()),
        }
    }
}
