//! Core business logic for Huddle.
//!
//! Pure business logic with no web or database dependencies. Repositories
//! load plain records and hand them to the services here.
//!
//! # Modules
//!
//! - `category` - Expense and revenue category enumerations
//! - `season` - Season types
//! - `aggregation` - Sums, group-bys and per-player cost breakdowns
//! - `reports` - Budget summaries and transparency reports
//! - `import` - CSV import parsing and templates
//! - `quick_entry` - Shortcut calculations for bulk fees and quick expenses
//! - `validation` - Shared input checks
//! - `auth` - Password hashing and user roles

pub mod aggregation;
pub mod auth;
pub mod category;
pub mod import;
pub mod quick_entry;
pub mod reports;
pub mod season;
pub mod validation;

pub use category::{ExpenseCategory, RevenueCategory, UnknownCategory};
pub use season::SeasonType;
