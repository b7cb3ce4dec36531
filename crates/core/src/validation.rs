//! Input checks shared by repositories and the import parser.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

/// Largest amount a money column (`NUMERIC(12, 2)`) can hold.
pub const MAX_AMOUNT: Decimal = dec!(9_999_999_999.99);

/// Decimal places kept for money.
pub const MONEY_SCALE: u32 = 2;

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A money field was negative.
    #[error("{field} cannot be negative")]
    NegativeAmount {
        /// Field name.
        field: &'static str,
    },

    /// A money field exceeded [`MAX_AMOUNT`].
    #[error("{field} cannot exceed {max}", max = MAX_AMOUNT)]
    AmountTooLarge {
        /// Field name.
        field: &'static str,
    },

    /// A money field had fractions of a cent.
    #[error("{field} cannot have more than 2 decimal places")]
    TooManyDecimals {
        /// Field name.
        field: &'static str,
    },

    /// A required text field was empty.
    #[error("{field} is required")]
    Blank {
        /// Field name.
        field: &'static str,
    },

    /// Start date after end date.
    #[error("start_date {start} is after end_date {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A count field was negative.
    #[error("{field} cannot be negative")]
    NegativeCount {
        /// Field name.
        field: &'static str,
    },
}

/// Checks that an amount fits a money column: non-negative, at most
/// [`MAX_AMOUNT`] and no finer than cents.
///
/// # Errors
///
/// Returns `NegativeAmount`, `AmountTooLarge` or `TooManyDecimals`.
pub fn money_amount(field: &'static str, amount: Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::NegativeAmount { field });
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge { field });
    }
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::TooManyDecimals { field });
    }
    Ok(())
}

/// Rejects negative counts such as player numbers.
///
/// # Errors
///
/// Returns `ValidationError::NegativeCount` when `count < 0`.
pub const fn non_negative_count(field: &'static str, count: i32) -> Result<(), ValidationError> {
    if count < 0 {
        return Err(ValidationError::NegativeCount { field });
    }
    Ok(())
}

/// Rejects empty or whitespace-only text.
///
/// # Errors
///
/// Returns `ValidationError::Blank` for blank input.
pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

/// Checks that a season does not end before it starts.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDateRange` when `start > end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start > end {
        return Err(ValidationError::InvalidDateRange { start, end });
    }
    Ok(())
}
