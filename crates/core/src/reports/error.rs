//! Report error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Season not found.
    #[error("Season not found: {0}")]
    SeasonNotFound(Uuid),

    /// Team not found.
    #[error("Team not found: {0}")]
    TeamNotFound(Uuid),

    /// Organization not found.
    #[error("Organization not found: {0}")]
    OrganizationNotFound(Uuid),

    /// The organization has no season matching the request.
    #[error("No seasons found for organization {0}")]
    NoSeasons(Uuid),
}
