//! CSV import parsing.
//!
//! Files are parsed into typed, validated rows. Bad rows do not abort the
//! file: each one becomes a [`RowError`] carrying its row number, counted
//! with the header as row 1. Reference checks against stored data and the
//! batched inserts happen in the database layer.

pub mod error;
pub mod parse;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ImportError;
pub use parse::{ImportRecord, ensure_csv_filename, parse_csv, parse_date};
pub use types::{
    ExpenseRow, ImportEntity, ImportSummary, OrganizationRow, ParsedImport, ParsedRow,
    RevenueRow, RowError, SeasonRow, TeamRow,
};
