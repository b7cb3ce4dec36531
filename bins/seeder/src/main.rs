//! Demo data seeder for Huddle development.
//!
//! Creates one organization with a season, two teams, budgets, expenses,
//! revenues and an admin login. Running it twice is a no-op.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use huddle_core::auth::{UserRole, hash_password};
use huddle_core::{ExpenseCategory, RevenueCategory, SeasonType};
use huddle_db::repositories::{
    CreateBudgetInput, CreateExpenseInput, CreateOrganizationInput, CreateRevenueInput,
    CreateTeamInput, CreateUserInput, SeasonInput,
};
use huddle_db::{
    BudgetRepository, ExpenseRepository, OrganizationRepository, RevenueRepository,
    SeasonRepository, TeamRepository, UserRepository,
};
use huddle_shared::AppConfig;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

const DEMO_ORGANIZATION: &str = "Riverside Youth Soccer";
const DEMO_ADMIN_EMAIL: &str = "admin@riverside.example";
const DEMO_ADMIN_PASSWORD: &str = "huddle-demo";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "huddle=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let db = huddle_db::connect(&config.database.url, 1, 1)
        .await
        .context("Failed to connect to database")?;

    let orgs = OrganizationRepository::new(db.clone()).list().await?;
    if orgs.iter().any(|o| o.name == DEMO_ORGANIZATION) {
        info!("Demo organization already exists, skipping");
        return Ok(());
    }

    seed(&db).await?;
    info!("Seeding complete");
    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d).context("invalid seed date")
}

async fn seed(db: &DatabaseConnection) -> anyhow::Result<()> {
    let org = OrganizationRepository::new(db.clone())
        .create(CreateOrganizationInput {
            name: DEMO_ORGANIZATION.to_string(),
            description: Some("Recreational soccer for ages 6 to 14".to_string()),
            website: Some("https://riverside.example".to_string()),
            contact_email: Some("treasurer@riverside.example".to_string()),
            contact_phone: None,
            is_public: true,
        })
        .await?;
    info!(organization_id = %org.id, "Seeded organization");

    let admin = UserRepository::new(db.clone())
        .create(CreateUserInput {
            email: DEMO_ADMIN_EMAIL.to_string(),
            full_name: "Demo Admin".to_string(),
            password_hash: hash_password(DEMO_ADMIN_PASSWORD)?,
            role: UserRole::Admin,
            phone_number: None,
            organization_id: Some(org.id),
        })
        .await?;
    info!(user_id = %admin.id, email = DEMO_ADMIN_EMAIL, "Seeded admin user");

    let season = SeasonRepository::new(db.clone())
        .create(SeasonInput {
            organization_id: Some(org.id),
            name: "Spring 2025".to_string(),
            season_type: SeasonType::Spring,
            year: 2025,
            start_date: date(2025, 3, 1)?,
            end_date: date(2025, 5, 31)?,
            is_active: true,
        })
        .await?;

    let teams = TeamRepository::new(db.clone());
    let tigers = teams
        .create(demo_team(season.id, "Tigers", "U10", 14, dec!(85)))
        .await?;
    let hawks = teams
        .create(demo_team(season.id, "Hawks", "U12", 12, dec!(95)))
        .await?;

    let budgets = BudgetRepository::new(db.clone());
    for (team_id, category, amount) in [
        (None, "Field rental", dec!(2400)),
        (Some(tigers.id), "Equipment", dec!(600)),
        (Some(hawks.id), "Tournaments", dec!(900)),
    ] {
        budgets
            .create(CreateBudgetInput {
                season_id: season.id,
                team_id,
                category: category.to_string(),
                budgeted_amount: amount,
                notes: None,
            })
            .await?;
    }

    let expenses = ExpenseRepository::new(db.clone());
    for (team_id, category, description, amount, day) in [
        (None, ExpenseCategory::FieldRental, "Spring field permit", dec!(1800), 3),
        (Some(tigers.id), ExpenseCategory::Equipment, "Balls and cones", dec!(240.50), 5),
        (Some(tigers.id), ExpenseCategory::Uniforms, "Jerseys", dec!(420), 7),
        (Some(hawks.id), ExpenseCategory::TournamentFees, "Memorial Day Cup", dec!(350), 20),
    ] {
        expenses
            .create(CreateExpenseInput {
                season_id: season.id,
                team_id,
                category,
                description: description.to_string(),
                amount,
                vendor: None,
                receipt_number: None,
                payment_date: date(2025, 3, day)?,
                notes: None,
                created_by: Some(admin.id),
            })
            .await?;
    }

    let revenues = RevenueRepository::new(db.clone());
    for (team_id, category, description, amount, source) in [
        (
            Some(tigers.id),
            RevenueCategory::RegistrationFees,
            "Tigers registrations",
            dec!(1190),
            None,
        ),
        (
            Some(hawks.id),
            RevenueCategory::RegistrationFees,
            "Hawks registrations",
            dec!(1140),
            None,
        ),
        (
            None,
            RevenueCategory::Sponsorships,
            "Banner sponsorship",
            dec!(500),
            Some("Main St Hardware"),
        ),
    ] {
        revenues
            .create(CreateRevenueInput {
                season_id: season.id,
                team_id,
                category,
                description: description.to_string(),
                amount,
                source: source.map(str::to_string),
                payment_date: date(2025, 3, 1)?,
                notes: None,
                created_by: Some(admin.id),
            })
            .await?;
    }

    info!(season_id = %season.id, "Seeded season with teams and finances");
    Ok(())
}

fn demo_team(
    season_id: Uuid,
    name: &str,
    age_group: &str,
    players: i32,
    fee: Decimal,
) -> CreateTeamInput {
    CreateTeamInput {
        season_id,
        name: name.to_string(),
        age_group: age_group.to_string(),
        sport: "soccer".to_string(),
        gender: None,
        coach_id: None,
        max_players: None,
        current_players: Some(players),
        registration_fee: Some(fee),
    }
}
