//! Tests for CSV import parsing.

use chrono::{Datelike, NaiveDate, Utc};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::error::ImportError;
use super::parse::{ensure_csv_filename, parse_csv, parse_date};
use super::types::{
    ExpenseRow, ImportEntity, ImportSummary, OrganizationRow, RevenueRow, RowError, SeasonRow,
    TeamRow,
};
use crate::category::{ExpenseCategory, RevenueCategory};
use crate::season::SeasonType;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case("2024-03-15")]
#[case("03/15/2024")]
#[case("03-15-2024")]
#[case("2024/03/15")]
#[case("  2024-03-15  ")]
fn test_parse_date_formats(#[case] input: &str) {
    assert_eq!(parse_date(input), Some(date(2024, 3, 15)));
}

#[rstest]
#[case("15.03.2024")]
#[case("2024-13-01")]
#[case("yesterday")]
#[case("")]
fn test_parse_date_rejects(#[case] input: &str) {
    assert_eq!(parse_date(input), None);
}

#[test]
fn test_expenses_with_one_bad_date_keep_other_rows() {
    let season = Uuid::new_v4();
    let csv = format!(
        "season_id,team_id,category,description,amount,vendor,receipt_number,payment_date,notes\n\
         {season},,equipment,Balls,120.50,Sports Depot,R-1,2024-03-01,\n\
         {season},,uniforms,Jerseys,300,,,not-a-date,\n\
         {season},,snacks,Orange slices,15,,,03/02/2024,halftime\n"
    );

    let parsed = parse_csv::<ExpenseRow, _>(csv.as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].row, 3);
    assert!(parsed.errors[0].message.contains("not-a-date"));

    let first = &parsed.rows[0];
    assert_eq!(first.row, 2);
    assert_eq!(first.record.amount, dec!(120.50));
    assert_eq!(first.record.vendor.as_deref(), Some("Sports Depot"));
    assert_eq!(first.record.notes, None);

    let fallback = &parsed.rows[1].record;
    assert_eq!(fallback.category, ExpenseCategory::Other);
    assert_eq!(fallback.payment_date, date(2024, 3, 2));
}

#[test]
fn test_expense_row_validation_messages() {
    let csv = "season_id,category,description,amount,payment_date\n\
               ,equipment,Balls,10,2024-01-01\n\
               not-a-uuid,equipment,Balls,10,2024-01-01\n\
               3f1f1c7e-6a55-4c6f-9f3a-2f1d8c9b7a10,equipment,Balls,-5,2024-01-01\n\
               3f1f1c7e-6a55-4c6f-9f3a-2f1d8c9b7a10,equipment,,10,2024-01-01\n\
               3f1f1c7e-6a55-4c6f-9f3a-2f1d8c9b7a10,equipment,Balls,ten,2024-01-01\n";

    let parsed = parse_csv::<ExpenseRow, _>(csv.as_bytes()).unwrap();

    assert!(parsed.rows.is_empty());
    let messages: Vec<String> = parsed.errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        messages,
        vec![
            "Row 2: season_id is required".to_string(),
            "Row 3: season_id 'not-a-uuid' is not a valid id".to_string(),
            "Row 4: amount cannot be negative".to_string(),
            "Row 5: description is required".to_string(),
            "Row 6: amount 'ten' is not a valid amount".to_string(),
        ]
    );
}

#[test]
fn test_revenue_rows() {
    let season = Uuid::new_v4();
    let team = Uuid::new_v4();
    let csv = format!(
        "season_id,team_id,category,description,amount,source,payment_date,notes\n\
         {season},{team},sponsorships,Hardware store banner,$500,Main St Hardware,2024/04/10,\n\
         {season},,bake sale,Cookies,80,,04-11-2024,\n"
    );

    let parsed = parse_csv::<RevenueRow, _>(csv.as_bytes()).unwrap();

    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.rows[0].record.team_id, Some(team));
    assert_eq!(parsed.rows[0].record.amount, dec!(500));
    assert_eq!(parsed.rows[0].record.category, RevenueCategory::Sponsorships);
    assert_eq!(parsed.rows[1].record.category, RevenueCategory::Other);
    assert_eq!(parsed.rows[1].record.payment_date, date(2024, 4, 11));
}

#[test]
fn test_season_defaults() {
    let csv = "name,season_type,year,start_date,end_date,is_active,organization_id\n\
               Fall League,,,2024-09-01,2024-11-30,,\n\
               Spring League,SPRING,2025,2025-03-01,2025-05-31,false,\n\
               Backwards,fall,2024,2024-12-01,2024-09-01,,\n\
               Monsoon,monsoon,2024,2024-06-01,2024-08-01,,\n";

    let parsed = parse_csv::<SeasonRow, _>(csv.as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 2);
    let fall = &parsed.rows[0].record;
    assert_eq!(fall.season_type, SeasonType::Fall);
    assert_eq!(fall.year, Utc::now().year());
    assert!(fall.is_active);
    assert_eq!(fall.organization_id, None);

    let spring = &parsed.rows[1].record;
    assert_eq!(spring.season_type, SeasonType::Spring);
    assert_eq!(spring.year, 2025);
    assert!(!spring.is_active);

    let rows: Vec<usize> = parsed.errors.iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![4, 5]);
}

#[test]
fn test_team_defaults_and_missing_columns() {
    let season = Uuid::new_v4();
    let csv = format!(
        "name,age_group,sport,season_id\n\
         Tigers,U10,soccer,{season}\n\
         Hawks,U12,soccer\n"
    );

    let parsed = parse_csv::<TeamRow, _>(csv.as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 1);
    let tigers = &parsed.rows[0].record;
    assert_eq!(tigers.max_players, 20);
    assert_eq!(tigers.registration_fee, Decimal::ZERO);
    assert_eq!(tigers.season_id, season);

    assert_eq!(
        parsed.errors,
        vec![RowError {
            row: 3,
            message: "season_id is required".to_string()
        }]
    );
}

#[test]
fn test_organization_rows() {
    let csv = "name,description,website,contact_email,contact_phone,is_public\n\
               Riverside Youth Soccer,,https://rys.example,info@rys.example,,true\n\
               Hilltop Little League,Baseball,,,,\n\
               ,nameless,,,,\n\
               Lakeside,,,,,maybe\n";

    let parsed = parse_csv::<OrganizationRow, _>(csv.as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 2);
    assert!(parsed.rows[0].record.is_public);
    assert!(!parsed.rows[1].record.is_public);
    assert_eq!(parsed.rows[1].record.description.as_deref(), Some("Baseball"));
    assert_eq!(parsed.errors.len(), 2);
}

#[test]
fn test_empty_file_is_malformed() {
    let result = parse_csv::<OrganizationRow, _>("".as_bytes());
    assert!(matches!(result, Err(ImportError::MalformedFile(_))));
}

#[test]
fn test_header_only_file_has_no_rows() {
    let parsed = parse_csv::<OrganizationRow, _>(ImportEntity::Organizations.template().as_bytes())
        .unwrap();
    assert!(parsed.rows.is_empty());
    assert!(parsed.errors.is_empty());
}

#[test]
fn test_entity_templates() {
    let entity: ImportEntity = "teams".parse().unwrap();
    assert_eq!(entity, ImportEntity::Teams);
    assert_eq!(
        entity.template(),
        "name,age_group,sport,gender,max_players,registration_fee,season_id,coach_id\n"
    );
    assert_eq!(entity.template_filename(), "teams_template.csv");
    assert_eq!(
        "players".parse::<ImportEntity>(),
        Err(ImportError::UnknownEntity("players".to_string()))
    );
}

#[test]
fn test_csv_filename_check() {
    assert!(ensure_csv_filename(Some("expenses.csv")).is_ok());
    assert!(ensure_csv_filename(Some("EXPENSES.CSV")).is_ok());
    assert_eq!(ensure_csv_filename(Some("expenses.xlsx")), Err(ImportError::NotCsv));
    assert_eq!(ensure_csv_filename(None), Err(ImportError::NotCsv));
}

#[test]
fn test_summary_orders_errors() {
    let summary = ImportSummary::new(
        ImportEntity::Expenses,
        4,
        vec![
            RowError { row: 9, message: "b".to_string() },
            RowError { row: 3, message: "a".to_string() },
        ],
    );

    assert_eq!(summary.message, "Imported 4 expenses");
    assert_eq!(summary.errors[0].row, 3);
}
