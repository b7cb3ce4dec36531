//! Initial database migration.
//!
//! Tables are generated from the entity definitions so the same migration
//! runs on `PostgreSQL` and on the `SQLite` databases used in tests.

use sea_orm::{DatabaseBackend, EntityName, Schema};
use sea_orm_migration::prelude::*;

use crate::entities::{budgets, expenses, organizations, players, revenues, seasons, teams, users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // ============================================================
        // PART 1: TABLES (parents first)
        // ============================================================
        manager
            .create_table(schema.create_table_from_entity(organizations::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(users::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(seasons::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(teams::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(budgets::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(expenses::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(revenues::Entity))
            .await?;
        manager
            .create_table(schema.create_table_from_entity(players::Entity))
            .await?;

        // ============================================================
        // PART 2: INDEXES
        // ============================================================
        create_index(
            manager,
            "idx_seasons_organization",
            seasons::Entity,
            seasons::Column::OrganizationId,
        )
        .await?;
        create_index(
            manager,
            "idx_teams_season",
            teams::Entity,
            teams::Column::SeasonId,
        )
        .await?;
        create_index(
            manager,
            "idx_budgets_season",
            budgets::Entity,
            budgets::Column::SeasonId,
        )
        .await?;
        create_index(
            manager,
            "idx_budgets_team",
            budgets::Entity,
            budgets::Column::TeamId,
        )
        .await?;
        create_index(
            manager,
            "idx_expenses_season",
            expenses::Entity,
            expenses::Column::SeasonId,
        )
        .await?;
        create_index(
            manager,
            "idx_expenses_team",
            expenses::Entity,
            expenses::Column::TeamId,
        )
        .await?;
        create_index(
            manager,
            "idx_revenues_season",
            revenues::Entity,
            revenues::Column::SeasonId,
        )
        .await?;
        create_index(
            manager,
            "idx_revenues_team",
            revenues::Entity,
            revenues::Column::TeamId,
        )
        .await?;
        create_index(
            manager,
            "idx_players_team",
            players::Entity,
            players::Column::TeamId,
        )
        .await?;

        // ============================================================
        // PART 3: CONSTRAINTS (PostgreSQL only)
        // ============================================================
        if backend == DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute_unprepared(NON_NEGATIVE_AMOUNTS_SQL)
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table(manager, players::Entity).await?;
        drop_table(manager, revenues::Entity).await?;
        drop_table(manager, expenses::Entity).await?;
        drop_table(manager, budgets::Entity).await?;
        drop_table(manager, teams::Entity).await?;
        drop_table(manager, seasons::Entity).await?;
        drop_table(manager, users::Entity).await?;
        drop_table(manager, organizations::Entity).await?;
        Ok(())
    }
}

async fn create_index<E, C>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: E,
    column: C,
) -> Result<(), DbErr>
where
    E: EntityName + 'static,
    C: IntoIden,
{
    manager
        .create_index(
            Index::create()
                .name(name)
                .table(table)
                .col(column)
                .to_owned(),
        )
        .await
}

async fn drop_table<E>(manager: &SchemaManager<'_>, table: E) -> Result<(), DbErr>
where
    E: EntityName + 'static,
{
    manager
        .drop_table(Table::drop().table(table).if_exists().to_owned())
        .await
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const NON_NEGATIVE_AMOUNTS_SQL: &str = r"
ALTER TABLE teams
    ADD CONSTRAINT teams_registration_fee_non_negative CHECK (registration_fee >= 0),
    ADD CONSTRAINT teams_player_counts_non_negative CHECK (max_players >= 0 AND current_players >= 0);
ALTER TABLE budgets
    ADD CONSTRAINT budgets_amount_non_negative CHECK (budgeted_amount >= 0);
ALTER TABLE expenses
    ADD CONSTRAINT expenses_amount_non_negative CHECK (amount >= 0);
ALTER TABLE revenues
    ADD CONSTRAINT revenues_amount_non_negative CHECK (amount >= 0);
ALTER TABLE players
    ADD CONSTRAINT players_fee_non_negative CHECK (registration_fee_amount >= 0);
ALTER TABLE seasons
    ADD CONSTRAINT seasons_date_range CHECK (end_date >= start_date);
";
