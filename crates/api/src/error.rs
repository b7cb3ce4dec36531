//! JSON error responses.
//!
//! Every handler returns `Result<_, ApiError>`. Repository errors convert
//! into the shared [`AppError`] taxonomy, which decides the status code and
//! the `{"error", "message"}` body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use huddle_core::UnknownCategory;
use huddle_core::auth::PasswordError;
use huddle_core::import::ImportError as CsvError;
use huddle_core::season::UnknownSeasonType;
use huddle_core::validation::ValidationError;
use huddle_db::repositories::{
    BudgetError, ExpenseError, ImportError, OrganizationError, PlayerError, QuickEntryError,
    ReferenceError, ReportError, RevenueError, SeasonError, TeamError, UserError,
};
use huddle_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

/// Error returned by handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = json!({
            "error": self.0.error_code(),
            "message": self.0.public_message(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<UnknownCategory> for ApiError {
    fn from(err: UnknownCategory) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<UnknownSeasonType> for ApiError {
    fn from(err: UnknownSeasonType) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        if err.is_policy_violation() {
            Self::validation(err.to_string())
        } else {
            Self(AppError::Internal(err.to_string()))
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<ReferenceError> for ApiError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::SeasonNotFound(_) | ReferenceError::TeamNotFound(_) => {
                Self::not_found(err.to_string())
            }
            ReferenceError::TeamNotInSeason { .. } => {
                Self(AppError::BusinessRule(err.to_string()))
            }
            ReferenceError::Database(e) => e.into(),
        }
    }
}

impl From<OrganizationError> for ApiError {
    fn from(err: OrganizationError) -> Self {
        match err {
            OrganizationError::NotFound(_) => Self::not_found(err.to_string()),
            OrganizationError::Validation(e) => e.into(),
            OrganizationError::Database(e) => e.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => Self(AppError::Conflict(err.to_string())),
            UserError::OrganizationNotFound(_) => Self::not_found(err.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<SeasonError> for ApiError {
    fn from(err: SeasonError) -> Self {
        match err {
            SeasonError::NotFound(_) | SeasonError::OrganizationNotFound(_) => {
                Self::not_found(err.to_string())
            }
            SeasonError::Validation(e) => e.into(),
            SeasonError::Database(e) => e.into(),
        }
    }
}

impl From<TeamError> for ApiError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::NotFound(_) | TeamError::CoachNotFound(_) => {
                Self::not_found(err.to_string())
            }
            TeamError::Reference(e) => e.into(),
            TeamError::Validation(e) => e.into(),
            TeamError::Database(e) => e.into(),
        }
    }
}

impl From<PlayerError> for ApiError {
    fn from(err: PlayerError) -> Self {
        match err {
            PlayerError::NotFound(_) => Self::not_found(err.to_string()),
            PlayerError::Reference(e) => e.into(),
            PlayerError::Validation(e) => e.into(),
            PlayerError::Database(e) => e.into(),
        }
    }
}

impl From<BudgetError> for ApiError {
    fn from(err: BudgetError) -> Self {
        match err {
            BudgetError::NotFound(_) => Self::not_found(err.to_string()),
            BudgetError::Reference(e) => e.into(),
            BudgetError::Validation(e) => e.into(),
            BudgetError::Database(e) => e.into(),
        }
    }
}

impl From<ExpenseError> for ApiError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::NotFound(_) => Self::not_found(err.to_string()),
            ExpenseError::Reference(e) => e.into(),
            ExpenseError::Validation(e) => e.into(),
            ExpenseError::Database(e) => e.into(),
        }
    }
}

impl From<RevenueError> for ApiError {
    fn from(err: RevenueError) -> Self {
        match err {
            RevenueError::NotFound(_) => Self::not_found(err.to_string()),
            RevenueError::Reference(e) => e.into(),
            RevenueError::Validation(e) => e.into(),
            RevenueError::Database(e) => e.into(),
        }
    }
}

impl From<QuickEntryError> for ApiError {
    fn from(err: QuickEntryError) -> Self {
        match err {
            QuickEntryError::Reference(e) => e.into(),
            QuickEntryError::Validation(e) => e.into(),
            QuickEntryError::Database(e) => e.into(),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::NotFound(e) => Self::not_found(e.to_string()),
            ReportError::Database(e) => e.into(),
        }
    }
}

impl From<CsvError> for ApiError {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::NotCsv | CsvError::MalformedFile(_) => Self::validation(err.to_string()),
            CsvError::UnknownEntity(_) => Self::not_found(err.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn weak_password_is_validation_but_corrupt_hash_is_internal() {
        let weak: ApiError = PasswordError::TooShort.into();
        assert_eq!(weak.0.status_code(), 400);
        assert_eq!(weak.0.public_message(), "password must be at least 8 characters");

        let corrupt: ApiError = PasswordError::CorruptHash.into();
        assert_eq!(corrupt.0.status_code(), 500);
    }

    #[test]
    fn team_in_wrong_season_is_business_rule() {
        let err: ApiError = ReferenceError::TeamNotInSeason {
            team_id: Uuid::nil(),
            season_id: Uuid::nil(),
        }
        .into();
        assert_eq!(err.0.status_code(), 422);
    }

    #[test]
    fn duplicate_email_is_conflict() {
        let err: ApiError = UserError::EmailTaken("a@b.example".to_string()).into();
        assert_eq!(err.0.status_code(), 409);
    }

    #[test]
    fn unknown_import_entity_is_not_found() {
        let err: ApiError = CsvError::UnknownEntity("players".to_string()).into();
        assert_eq!(err.0.status_code(), 404);
    }

    #[test]
    fn database_errors_hide_details() {
        let err: ApiError = DbErr::Custom("relation \"teams\" does not exist".to_string()).into();
        assert_eq!(err.0.status_code(), 500);
        assert_eq!(err.0.public_message(), "An internal error occurred");
    }
}
