//! Shared fixtures for database integration tests.
//!
//! Every test gets its own in-memory `SQLite` database with the real
//! migrations applied.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use huddle_core::{ExpenseCategory, RevenueCategory, SeasonType};
use huddle_db::entities::{expenses, organizations, revenues, seasons, teams};
use huddle_db::migration::Migrator;
use huddle_db::repositories::{
    CreateExpenseInput, CreateOrganizationInput, CreateRevenueInput, CreateTeamInput, SeasonInput,
};
use huddle_db::{
    ExpenseRepository, OrganizationRepository, RevenueRepository, SeasonRepository,
    TeamRepository,
};

/// Opens a fresh migrated database.
pub async fn setup() -> DatabaseConnection {
    let db = huddle_db::connect("sqlite::memory:", 1, 1)
        .await
        .expect("Failed to open SQLite database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub async fn create_org(db: &DatabaseConnection, name: &str) -> organizations::Model {
    OrganizationRepository::new(db.clone())
        .create(CreateOrganizationInput {
            name: name.to_string(),
            is_public: true,
            ..Default::default()
        })
        .await
        .expect("Failed to create organization")
}

pub fn season_input(organization_id: Option<Uuid>, name: &str, year: i32) -> SeasonInput {
    SeasonInput {
        organization_id,
        name: name.to_string(),
        season_type: SeasonType::Spring,
        year,
        start_date: date(year, 3, 1),
        end_date: date(year, 5, 31),
        is_active: true,
    }
}

pub async fn create_season(
    db: &DatabaseConnection,
    organization_id: Option<Uuid>,
    name: &str,
) -> seasons::Model {
    SeasonRepository::new(db.clone())
        .create(season_input(organization_id, name, 2024))
        .await
        .expect("Failed to create season")
}

pub async fn create_team(
    db: &DatabaseConnection,
    season_id: Uuid,
    name: &str,
    current_players: i32,
    registration_fee: Decimal,
) -> teams::Model {
    TeamRepository::new(db.clone())
        .create(CreateTeamInput {
            season_id,
            name: name.to_string(),
            age_group: "U10".to_string(),
            sport: "soccer".to_string(),
            gender: None,
            coach_id: None,
            max_players: None,
            current_players: Some(current_players),
            registration_fee: Some(registration_fee),
        })
        .await
        .expect("Failed to create team")
}

pub fn expense_input(
    season_id: Uuid,
    team_id: Option<Uuid>,
    category: ExpenseCategory,
    amount: Decimal,
) -> CreateExpenseInput {
    CreateExpenseInput {
        season_id,
        team_id,
        category,
        description: format!("{category} purchase"),
        amount,
        vendor: None,
        receipt_number: None,
        payment_date: date(2024, 4, 1),
        notes: None,
        created_by: None,
    }
}

pub async fn create_expense(
    db: &DatabaseConnection,
    season_id: Uuid,
    team_id: Option<Uuid>,
    category: ExpenseCategory,
    amount: Decimal,
) -> expenses::Model {
    ExpenseRepository::new(db.clone())
        .create(expense_input(season_id, team_id, category, amount))
        .await
        .expect("Failed to create expense")
}

pub async fn create_revenue(
    db: &DatabaseConnection,
    season_id: Uuid,
    team_id: Option<Uuid>,
    category: RevenueCategory,
    amount: Decimal,
) -> revenues::Model {
    RevenueRepository::new(db.clone())
        .create(CreateRevenueInput {
            season_id,
            team_id,
            category,
            description: format!("{category} income"),
            amount,
            source: None,
            payment_date: date(2024, 4, 2),
            notes: None,
            created_by: None,
        })
        .await
        .expect("Failed to create revenue")
}
