//! CSV parsing and row validation.

use std::io::Read;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::error::ImportError;
use super::types::{
    ExpenseRow, OrganizationRow, ParsedImport, ParsedRow, RevenueRow, RowError, SeasonRow, TeamRow,
};
use crate::category::{ExpenseCategory, RevenueCategory};
use crate::season::SeasonType;
use crate::validation;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%Y/%m/%d"];

const DEFAULT_MAX_PLAYERS: i32 = 20;

/// A record type that can be built from one CSV row.
pub trait ImportRecord: Sized {
    /// Loose, all-optional shape deserialized straight from the row.
    type Raw: DeserializeOwned;

    /// Validates a raw row. The error is the message reported for the row.
    ///
    /// # Errors
    ///
    /// Returns a human readable message describing the first problem found.
    fn from_raw(raw: Self::Raw) -> Result<Self, String>;
}

/// Parses a date in `YYYY-MM-DD`, `MM/DD/YYYY`, `MM-DD-YYYY` or `YYYY/MM/DD` form.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Rejects uploads whose file name does not end in `.csv`.
///
/// # Errors
///
/// Returns `ImportError::NotCsv` for missing or non-CSV file names.
pub fn ensure_csv_filename(file_name: Option<&str>) -> Result<(), ImportError> {
    match file_name {
        Some(name) if name.to_ascii_lowercase().ends_with(".csv") => Ok(()),
        _ => Err(ImportError::NotCsv),
    }
}

/// Parses a CSV file with a header row into validated records.
///
/// # Errors
///
/// Returns `ImportError::MalformedFile` if the header row is missing or
/// unreadable. Problems with individual rows are collected instead.
pub fn parse_csv<T, R>(reader: R) -> Result<ParsedImport<T>, ImportError>
where
    T: ImportRecord,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ImportError::MalformedFile(e.to_string()))?
        .clone();
    if headers.iter().all(str::is_empty) {
        return Err(ImportError::MalformedFile("missing header row".to_string()));
    }

    let mut parsed = ParsedImport::default();
    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 2;
        let outcome = record
            .map_err(|e| e.to_string())
            .and_then(|r| {
                r.deserialize::<T::Raw>(Some(&headers))
                    .map_err(|e| e.to_string())
            })
            .and_then(T::from_raw);

        match outcome {
            Ok(record) => parsed.rows.push(ParsedRow { row, record }),
            Err(message) => parsed.errors.push(RowError { row, message }),
        }
    }

    Ok(parsed)
}

// ============================================================================
// Raw rows
// ============================================================================

/// Raw organization row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawOrganizationRow {
    name: Option<String>,
    description: Option<String>,
    website: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    is_public: Option<String>,
}

/// Raw season row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSeasonRow {
    name: Option<String>,
    season_type: Option<String>,
    year: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    is_active: Option<String>,
    organization_id: Option<String>,
}

/// Raw team row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawTeamRow {
    name: Option<String>,
    age_group: Option<String>,
    sport: Option<String>,
    gender: Option<String>,
    max_players: Option<String>,
    registration_fee: Option<String>,
    season_id: Option<String>,
    coach_id: Option<String>,
}

/// Raw expense row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawExpenseRow {
    season_id: Option<String>,
    team_id: Option<String>,
    category: Option<String>,
    description: Option<String>,
    amount: Option<String>,
    vendor: Option<String>,
    receipt_number: Option<String>,
    payment_date: Option<String>,
    notes: Option<String>,
}

/// Raw revenue row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRevenueRow {
    season_id: Option<String>,
    team_id: Option<String>,
    category: Option<String>,
    description: Option<String>,
    amount: Option<String>,
    source: Option<String>,
    payment_date: Option<String>,
    notes: Option<String>,
}

// ============================================================================
// Validation
// ============================================================================

impl ImportRecord for OrganizationRow {
    type Raw = RawOrganizationRow;

    fn from_raw(raw: Self::Raw) -> Result<Self, String> {
        Ok(Self {
            name: required_text("name", raw.name)?,
            description: text(raw.description),
            website: text(raw.website),
            contact_email: text(raw.contact_email),
            contact_phone: text(raw.contact_phone),
            is_public: flag("is_public", raw.is_public, false)?,
        })
    }
}

impl ImportRecord for SeasonRow {
    type Raw = RawSeasonRow;

    fn from_raw(raw: Self::Raw) -> Result<Self, String> {
        let season_type = match text(raw.season_type) {
            Some(value) => SeasonType::from_str(&value).map_err(|e| e.to_string())?,
            None => SeasonType::default(),
        };
        let year = match text(raw.year) {
            Some(value) => number::<i32>("year", &value)?,
            None => Utc::now().year(),
        };
        let start_date = required_date("start_date", raw.start_date)?;
        let end_date = required_date("end_date", raw.end_date)?;
        validation::date_range(start_date, end_date).map_err(|e| e.to_string())?;

        Ok(Self {
            name: required_text("name", raw.name)?,
            season_type,
            year,
            start_date,
            end_date,
            is_active: flag("is_active", raw.is_active, true)?,
            organization_id: optional_uuid("organization_id", raw.organization_id)?,
        })
    }
}

impl ImportRecord for TeamRow {
    type Raw = RawTeamRow;

    fn from_raw(raw: Self::Raw) -> Result<Self, String> {
        let max_players = match text(raw.max_players) {
            Some(value) => number::<i32>("max_players", &value)?,
            None => DEFAULT_MAX_PLAYERS,
        };
        validation::non_negative_count("max_players", max_players).map_err(|e| e.to_string())?;

        let registration_fee = match text(raw.registration_fee) {
            Some(value) => amount("registration_fee", &value)?,
            None => Decimal::ZERO,
        };

        Ok(Self {
            name: required_text("name", raw.name)?,
            age_group: required_text("age_group", raw.age_group)?,
            sport: required_text("sport", raw.sport)?,
            gender: text(raw.gender),
            max_players,
            registration_fee,
            season_id: required_uuid("season_id", raw.season_id)?,
            coach_id: optional_uuid("coach_id", raw.coach_id)?,
        })
    }
}

impl ImportRecord for ExpenseRow {
    type Raw = RawExpenseRow;

    fn from_raw(raw: Self::Raw) -> Result<Self, String> {
        Ok(Self {
            season_id: required_uuid("season_id", raw.season_id)?,
            team_id: optional_uuid("team_id", raw.team_id)?,
            category: ExpenseCategory::from_import(raw.category.as_deref().unwrap_or_default()),
            description: required_text("description", raw.description)?,
            amount: required_amount(raw.amount)?,
            vendor: text(raw.vendor),
            receipt_number: text(raw.receipt_number),
            payment_date: required_date("payment_date", raw.payment_date)?,
            notes: text(raw.notes),
        })
    }
}

impl ImportRecord for RevenueRow {
    type Raw = RawRevenueRow;

    fn from_raw(raw: Self::Raw) -> Result<Self, String> {
        Ok(Self {
            season_id: required_uuid("season_id", raw.season_id)?,
            team_id: optional_uuid("team_id", raw.team_id)?,
            category: RevenueCategory::from_import(raw.category.as_deref().unwrap_or_default()),
            description: required_text("description", raw.description)?,
            amount: required_amount(raw.amount)?,
            source: text(raw.source),
            payment_date: required_date("payment_date", raw.payment_date)?,
            notes: text(raw.notes),
        })
    }
}

// ============================================================================
// Field helpers
// ============================================================================

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, String> {
    text(value).ok_or_else(|| format!("{field} is required"))
}

fn required_date(field: &'static str, value: Option<String>) -> Result<NaiveDate, String> {
    let value = required_text(field, value)?;
    parse_date(&value).ok_or_else(|| format!("Unable to parse date: {value}"))
}

fn required_uuid(field: &'static str, value: Option<String>) -> Result<Uuid, String> {
    let value = required_text(field, value)?;
    Uuid::parse_str(&value).map_err(|_| format!("{field} '{value}' is not a valid id"))
}

fn optional_uuid(field: &'static str, value: Option<String>) -> Result<Option<Uuid>, String> {
    text(value)
        .map(|v| Uuid::parse_str(&v).map_err(|_| format!("{field} '{v}' is not a valid id")))
        .transpose()
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("{field} '{value}' is not a valid number"))
}

fn amount(field: &'static str, value: &str) -> Result<Decimal, String> {
    let parsed = Decimal::from_str(value.trim_start_matches('$'))
        .map_err(|_| format!("{field} '{value}' is not a valid amount"))?;
    validation::money_amount(field, parsed).map_err(|e| e.to_string())?;
    Ok(parsed)
}

fn required_amount(value: Option<String>) -> Result<Decimal, String> {
    let value = required_text("amount", value)?;
    amount("amount", &value)
}

fn flag(field: &'static str, value: Option<String>, default: bool) -> Result<bool, String> {
    let Some(value) = text(value) else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(format!("{field} '{value}' must be true or false")),
    }
}
