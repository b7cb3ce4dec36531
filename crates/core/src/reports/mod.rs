//! Budget summaries and transparency reports.
//!
//! This module assembles aggregation outputs into the three report shapes:
//! - Season budget summary
//! - Team budget summary (with registration fee roll-ups)
//! - Transparency report, scoped to a season or to a whole organization
//!
//! Reports are pure reads, computed fresh for each request.

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
