//! Season types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The part of the year a season runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonType {
    /// Spring season.
    Spring,
    /// Summer season.
    Summer,
    /// Fall season.
    #[default]
    Fall,
    /// Winter season.
    Winter,
}

/// A season type string that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid season type '{0}'. Must be one of: spring, summer, fall, winter")]
pub struct UnknownSeasonType(pub String);

impl SeasonType {
    /// Returns the wire name of the season type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
            Self::Winter => "winter",
        }
    }
}

impl std::fmt::Display for SeasonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeasonType {
    type Err = UnknownSeasonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "fall" => Ok(Self::Fall),
            "winter" => Ok(Self::Winter),
            _ => Err(UnknownSeasonType(s.to_string())),
        }
    }
}
