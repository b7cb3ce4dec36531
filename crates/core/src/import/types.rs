//! Import data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ImportError;
use crate::category::{ExpenseCategory, RevenueCategory};
use crate::season::SeasonType;

/// Entity types that can be imported from CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportEntity {
    /// Organizations.
    Organizations,
    /// Seasons.
    Seasons,
    /// Teams.
    Teams,
    /// Expenses.
    Expenses,
    /// Revenues.
    Revenues,
}

impl ImportEntity {
    /// Path segment and plural name of the entity.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Organizations => "organizations",
            Self::Seasons => "seasons",
            Self::Teams => "teams",
            Self::Expenses => "expenses",
            Self::Revenues => "revenues",
        }
    }

    /// CSV header line users fill in.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Organizations => "name,description,website,contact_email,contact_phone,is_public\n",
            Self::Seasons => "name,season_type,year,start_date,end_date,is_active,organization_id\n",
            Self::Teams => {
                "name,age_group,sport,gender,max_players,registration_fee,season_id,coach_id\n"
            }
            Self::Expenses => {
                "season_id,team_id,category,description,amount,vendor,receipt_number,payment_date,notes\n"
            }
            Self::Revenues => {
                "season_id,team_id,category,description,amount,source,payment_date,notes\n"
            }
        }
    }

    /// File name offered when downloading the template.
    #[must_use]
    pub fn template_filename(self) -> String {
        format!("{}_template.csv", self.as_str())
    }
}

impl std::str::FromStr for ImportEntity {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "organizations" => Ok(Self::Organizations),
            "seasons" => Ok(Self::Seasons),
            "teams" => Ok(Self::Teams),
            "expenses" => Ok(Self::Expenses),
            "revenues" => Ok(Self::Revenues),
            other => Err(ImportError::UnknownEntity(other.to_string())),
        }
    }
}

/// A rejected row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Row number in the file, header = 1.
    pub row: usize,
    /// What was wrong with it.
    pub message: String,
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// A validated row and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow<T> {
    /// Row number in the file, header = 1.
    pub row: usize,
    /// The validated record.
    pub record: T,
}

/// Result of parsing a whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport<T> {
    /// Rows that passed validation, in file order.
    pub rows: Vec<ParsedRow<T>>,
    /// Rows that did not.
    pub errors: Vec<RowError>,
}

impl<T> Default for ParsedImport<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Partial-success summary returned by import endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Human readable outcome.
    pub message: String,
    /// Number of rows written.
    pub created: usize,
    /// Rows that were skipped.
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    /// Builds the summary for an entity type.
    #[must_use]
    pub fn new(entity: ImportEntity, created: usize, mut errors: Vec<RowError>) -> Self {
        errors.sort_by_key(|e| e.row);
        Self {
            message: format!("Imported {created} {}", entity.as_str()),
            created,
            errors,
        }
    }
}

/// An organization row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRow {
    /// Name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Website.
    pub website: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Contact phone.
    pub contact_phone: Option<String>,
    /// Publicly visible. Defaults to `false`.
    pub is_public: bool,
}

/// A season row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRow {
    /// Name.
    pub name: String,
    /// Season type. Defaults to fall.
    pub season_type: SeasonType,
    /// Year. Defaults to the current year.
    pub year: i32,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Active flag. Defaults to `true`.
    pub is_active: bool,
    /// Owning organization.
    pub organization_id: Option<Uuid>,
}

/// A team row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRow {
    /// Name.
    pub name: String,
    /// Age group, e.g. `U10`.
    pub age_group: String,
    /// Sport.
    pub sport: String,
    /// Gender.
    pub gender: Option<String>,
    /// Roster limit. Defaults to 20.
    pub max_players: i32,
    /// Fee per player. Defaults to 0.
    pub registration_fee: Decimal,
    /// Season the team plays in.
    pub season_id: Uuid,
    /// Coach user.
    pub coach_id: Option<Uuid>,
}

/// An expense row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    /// Season.
    pub season_id: Uuid,
    /// Team, if team specific.
    pub team_id: Option<Uuid>,
    /// Category, `other` when unrecognised.
    pub category: ExpenseCategory,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Vendor.
    pub vendor: Option<String>,
    /// Receipt number.
    pub receipt_number: Option<String>,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
}

/// A revenue row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueRow {
    /// Season.
    pub season_id: Uuid,
    /// Team, if team specific.
    pub team_id: Option<Uuid>,
    /// Category, `other` when unrecognised.
    pub category: RevenueCategory,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Source, e.g. the sponsor.
    pub source: Option<String>,
    /// Payment date.
    pub payment_date: NaiveDate,
    /// Notes.
    pub notes: Option<String>,
}
