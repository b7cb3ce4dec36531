//! Expense and revenue categories.
//!
//! Both enumerations are closed and carry an explicit `Other` variant.
//! Interactive input is parsed strictly with [`std::str::FromStr`]; CSV
//! imports use `from_import`, which falls back to `Other`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A category string that does not name any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category '{value}'. Must be one of: {allowed}")]
pub struct UnknownCategory {
    /// The rejected input.
    pub value: String,
    /// Comma separated list of accepted values.
    pub allowed: String,
}

macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the wire name of the category.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parses an imported value, falling back to `Other` for anything unknown.
            #[must_use]
            pub fn from_import(value: &str) -> Self {
                value.parse().unwrap_or(Self::Other)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownCategory;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str() == normalized)
                    .ok_or_else(|| UnknownCategory {
                        value: s.to_string(),
                        allowed: Self::ALL
                            .iter()
                            .map(|c| c.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

category_enum! {
    /// What an expense was spent on.
    ExpenseCategory {
        /// Balls, nets, cones.
        Equipment => "equipment",
        /// Jerseys and kits.
        Uniforms => "uniforms",
        /// Field or gym rental.
        FieldRental => "field_rental",
        /// Referee and umpire fees.
        RefereeFees => "referee_fees",
        /// Coaching stipends.
        CoachingStipends => "coaching_stipends",
        /// Travel costs.
        Travel => "travel",
        /// Tournament entry fees.
        TournamentFees => "tournament_fees",
        /// Insurance premiums.
        Insurance => "insurance",
        /// First aid supplies.
        FirstAid => "first_aid",
        /// Trophies and medals.
        Awards => "awards",
        /// Marketing and promotion.
        Marketing => "marketing",
        /// Administrative overhead.
        Administration => "administration",
        /// Anything else.
        Other => "other",
    }
}

category_enum! {
    /// Where revenue came from.
    RevenueCategory {
        /// Player registration fees.
        RegistrationFees => "registration_fees",
        /// Sponsorships.
        Sponsorships => "sponsorships",
        /// Fundraising events.
        Fundraisers => "fundraisers",
        /// Concession stand sales.
        Concessions => "concessions",
        /// Merchandise sales.
        Merchandise => "merchandise",
        /// Donations.
        Donations => "donations",
        /// Anything else.
        Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("equipment", ExpenseCategory::Equipment)]
    #[case("field_rental", ExpenseCategory::FieldRental)]
    #[case(" Referee_Fees ", ExpenseCategory::RefereeFees)]
    #[case("other", ExpenseCategory::Other)]
    fn expense_category_parses_known_values(#[case] input: &str, #[case] expected: ExpenseCategory) {
        assert_eq!(input.parse::<ExpenseCategory>().unwrap(), expected);
    }

    #[test]
    fn strict_parse_rejects_unknown_values() {
        let err = "snacks".parse::<ExpenseCategory>().unwrap_err();
        assert_eq!(err.value, "snacks");
        assert!(err.allowed.contains("equipment"));
        assert!(err.to_string().starts_with("Unknown category 'snacks'"));
    }

    #[test]
    fn import_parse_falls_back_to_other() {
        assert_eq!(ExpenseCategory::from_import("snacks"), ExpenseCategory::Other);
        assert_eq!(ExpenseCategory::from_import(""), ExpenseCategory::Other);
        assert_eq!(RevenueCategory::from_import("bake sale"), RevenueCategory::Other);
        assert_eq!(
            RevenueCategory::from_import("sponsorships"),
            RevenueCategory::Sponsorships
        );
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&RevenueCategory::RegistrationFees).unwrap();
        assert_eq!(json, "\"registration_fees\"");

        let parsed: ExpenseCategory = serde_json::from_str("\"tournament_fees\"").unwrap();
        assert_eq!(parsed, ExpenseCategory::TournamentFees);
    }

    #[test]
    fn display_matches_wire_name() {
        for category in ExpenseCategory::ALL {
            let json = serde_json::to_string(category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
        assert_eq!(RevenueCategory::ALL.len(), 7);
        assert_eq!(ExpenseCategory::ALL.len(), 13);
    }
}
