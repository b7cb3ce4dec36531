//! Import error types.

use thiserror::Error;

/// File-level import failures. Row-level problems are reported as
/// [`super::RowError`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The upload is not a `.csv` file.
    #[error("File must be a CSV")]
    NotCsv,

    /// The file could not be read as CSV at all.
    #[error("Malformed CSV file: {0}")]
    MalformedFile(String),

    /// The entity type in the path is not importable.
    #[error("Template not found for {0}")]
    UnknownEntity(String),
}
