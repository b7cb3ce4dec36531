//! `SeaORM` active enums, stored as text columns.
//!
//! Each enum mirrors a `huddle_core` type and converts both ways.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use huddle_core::auth::UserRole as CoreUserRole;
use huddle_core::{
    ExpenseCategory as CoreExpenseCategory, RevenueCategory as CoreRevenueCategory,
    SeasonType as CoreSeasonType,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "equipment")]
    Equipment,
    #[sea_orm(string_value = "uniforms")]
    Uniforms,
    #[sea_orm(string_value = "field_rental")]
    FieldRental,
    #[sea_orm(string_value = "referee_fees")]
    RefereeFees,
    #[sea_orm(string_value = "coaching_stipends")]
    CoachingStipends,
    #[sea_orm(string_value = "travel")]
    Travel,
    #[sea_orm(string_value = "tournament_fees")]
    TournamentFees,
    #[sea_orm(string_value = "insurance")]
    Insurance,
    #[sea_orm(string_value = "first_aid")]
    FirstAid,
    #[sea_orm(string_value = "awards")]
    Awards,
    #[sea_orm(string_value = "marketing")]
    Marketing,
    #[sea_orm(string_value = "administration")]
    Administration,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum RevenueCategory {
    #[sea_orm(string_value = "registration_fees")]
    RegistrationFees,
    #[sea_orm(string_value = "sponsorships")]
    Sponsorships,
    #[sea_orm(string_value = "fundraisers")]
    Fundraisers,
    #[sea_orm(string_value = "concessions")]
    Concessions,
    #[sea_orm(string_value = "merchandise")]
    Merchandise,
    #[sea_orm(string_value = "donations")]
    Donations,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum SeasonType {
    #[sea_orm(string_value = "spring")]
    Spring,
    #[sea_orm(string_value = "summer")]
    Summer,
    #[sea_orm(string_value = "fall")]
    Fall,
    #[sea_orm(string_value = "winter")]
    Winter,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "coach")]
    Coach,
    #[sea_orm(string_value = "viewer")]
    Viewer,
}

/// Generates `From` conversions between a stored enum and its core twin.
macro_rules! mirror_enum {
    ($db:ident <=> $core:ident { $($variant:ident),+ $(,)? }) => {
        impl From<$core> for $db {
            fn from(value: $core) -> Self {
                match value {
                    $($core::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$db> for $core {
            fn from(value: $db) -> Self {
                match value {
                    $($db::$variant => Self::$variant,)+
                }
            }
        }
    };
}

mirror_enum!(ExpenseCategory <=> CoreExpenseCategory {
    Equipment, Uniforms, FieldRental, RefereeFees, CoachingStipends, Travel, TournamentFees,
    Insurance, FirstAid, Awards, Marketing, Administration, Other,
});

mirror_enum!(RevenueCategory <=> CoreRevenueCategory {
    RegistrationFees, Sponsorships, Fundraisers, Concessions, Merchandise, Donations, Other,
});

mirror_enum!(SeasonType <=> CoreSeasonType { Spring, Summer, Fall, Winter });

mirror_enum!(UserRole <=> CoreUserRole { Admin, Coach, Viewer });
