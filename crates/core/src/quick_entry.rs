//! Shortcut calculations for bulk registration fees and quick expenses.

use rust_decimal::Decimal;

use crate::aggregation::AggregationService;
use crate::validation::{self, ValidationError};

/// Total revenue for a bulk registration: `player_count * fee_per_player`.
///
/// # Errors
///
/// Returns `AmountTooLarge` when the total does not fit a money column.
pub fn bulk_fee_total(
    player_count: i32,
    fee_per_player: Decimal,
) -> Result<Decimal, ValidationError> {
    let total = Decimal::from(player_count)
        .checked_mul(fee_per_player)
        .ok_or(ValidationError::AmountTooLarge { field: "total_amount" })?;
    validation::money_amount("total_amount", total)?;
    Ok(total)
}

/// Description stored on the revenue created by a bulk registration.
#[must_use]
pub fn bulk_fee_description(player_count: i32, fee_per_player: Decimal) -> String {
    format!("Registration fees for {player_count} players @ ${fee_per_player}")
}

/// Per-player share of an expense, when a positive player count is given.
#[must_use]
pub fn per_player_cost(amount: Decimal, player_count: Option<i32>) -> Option<Decimal> {
    player_count
        .filter(|count| *count > 0)
        .map(|count| AggregationService::per_player(amount, count))
}

/// Description stored on a quick expense.
///
/// With a per-player split the description is suffixed with the split,
/// e.g. `"Tournament entry (12 players @ $25.00 each)"`.
#[must_use]
pub fn quick_expense_description(
    description: &str,
    player_count: Option<i32>,
    per_player: Option<Decimal>,
) -> String {
    match (player_count, per_player) {
        (Some(count), Some(cost)) => {
            let mut cost = cost;
            cost.rescale(2);
            format!("{description} ({count} players @ ${cost} each)")
        }
        _ => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn bulk_fee_total_multiplies() {
        assert_eq!(bulk_fee_total(15, dec!(85)), Ok(dec!(1275)));
        assert_eq!(bulk_fee_total(0, dec!(85)), Ok(Decimal::ZERO));
    }

    #[rstest]
    #[case(2, Decimal::MAX)]
    #[case(i32::MAX, dec!(9_999_999.99))]
    fn bulk_fee_total_rejects_totals_too_large(#[case] count: i32, #[case] fee: Decimal) {
        assert_eq!(
            bulk_fee_total(count, fee),
            Err(ValidationError::AmountTooLarge { field: "total_amount" })
        );
    }

    #[test]
    fn bulk_fee_description_names_count_and_rate() {
        assert_eq!(
            bulk_fee_description(15, dec!(85.00)),
            "Registration fees for 15 players @ $85.00"
        );
    }

    #[rstest]
    #[case(dec!(300), Some(12), Some(dec!(25)))]
    #[case(dec!(100), Some(3), Some(dec!(33.33)))]
    #[case(dec!(100), Some(0), None)]
    #[case(dec!(100), None, None)]
    fn per_player_cost_cases(
        #[case] amount: Decimal,
        #[case] count: Option<i32>,
        #[case] expected: Option<Decimal>,
    ) {
        assert_eq!(per_player_cost(amount, count), expected);
    }

    #[test]
    fn quick_expense_description_formats_two_decimals() {
        assert_eq!(
            quick_expense_description("Tournament entry", Some(12), Some(dec!(25))),
            "Tournament entry (12 players @ $25.00 each)"
        );
        assert_eq!(
            quick_expense_description("Tournament entry", Some(0), None),
            "Tournament entry"
        );
    }
}
