//! Authentication and password hashing.
//!
//! This module provides:
//! - The password length policy
//! - Password hashing and verification with Argon2id
//! - User role definitions and what each role may change

mod password;

pub use password::{
    MIN_PASSWORD_LENGTH, PasswordError, check_policy, hash_password, verify_password,
};

use serde::{Deserialize, Serialize};

/// User roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Manages organizations, seasons, teams and budgets.
    Admin,
    /// Records expenses, revenues and players for teams.
    Coach,
    /// Read-only access.
    #[default]
    Viewer,
}

impl UserRole {
    /// Returns true if this role can create or delete organizations,
    /// seasons, teams and budgets, and run imports.
    #[must_use]
    pub const fn can_manage_structure(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role can record expenses, revenues and players.
    #[must_use]
    pub const fn can_record_finances(&self) -> bool {
        matches!(self, Self::Admin | Self::Coach)
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coach => "coach",
            Self::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "coach" => Ok(Self::Coach),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!(
                "Invalid role '{other}'. Must be one of: admin, coach, viewer"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        assert!(UserRole::Admin.can_manage_structure());
        assert!(!UserRole::Coach.can_manage_structure());
        assert!(!UserRole::Viewer.can_manage_structure());

        assert!(UserRole::Admin.can_record_finances());
        assert!(UserRole::Coach.can_record_finances());
        assert!(!UserRole::Viewer.can_record_finances());
    }

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Admin, UserRole::Coach, UserRole::Viewer] {
            assert_eq!(role.to_string().parse::<UserRole>().unwrap(), role);
        }
        assert!("owner".parse::<UserRole>().is_err());
    }
}
