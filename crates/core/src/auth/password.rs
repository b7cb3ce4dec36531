//! Account passwords: the length policy and Argon2id hashes.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Shortest password accepted at registration, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Password problems.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The chosen password breaks the length policy.
    #[error("password must be at least {min} characters", min = MIN_PASSWORD_LENGTH)]
    TooShort,

    /// Argon2 could not produce or check a hash.
    #[error("password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    /// The stored hash is not a PHC string.
    #[error("stored password hash is corrupt")]
    CorruptHash,
}

impl PasswordError {
    /// Whether the caller chose a bad password, as opposed to a server fault.
    #[must_use]
    pub const fn is_policy_violation(&self) -> bool {
        matches!(self, Self::TooShort)
    }
}

/// Checks a new password against the length policy.
///
/// # Errors
///
/// Returns `TooShort` below [`MIN_PASSWORD_LENGTH`] characters.
pub fn check_policy(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}

/// Applies the policy, then hashes with a fresh salt.
///
/// # Errors
///
/// Returns `TooShort` for a weak password and `Hashing` if Argon2 fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    check_policy(password)?;
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(PasswordError::Hashing)
}

/// Whether `password` matches the stored hash. A mismatch is `Ok(false)`.
///
/// # Errors
///
/// Returns `CorruptHash` for an unparsable hash and `Hashing` for any other
/// Argon2 failure.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let stored = PasswordHash::new(stored_hash).map_err(|_| PasswordError::CorruptHash)?;
    match Argon2::default().verify_password(password.as_bytes(), &stored) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hashing(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("seven77")]
    #[case("ñandú12")]
    fn short_passwords_break_policy(#[case] password: &str) {
        let err = hash_password(password).unwrap_err();
        assert!(matches!(err, PasswordError::TooShort));
        assert!(err.is_policy_violation());
    }

    #[test]
    fn policy_counts_characters_not_bytes() {
        assert!(check_policy("ñandúñandú").is_ok());
        assert!(check_policy("ññññ").is_err());
    }

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("goalkeeper-2024").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("goalkeeper-2024", &hash).unwrap());
        assert!(!verify_password("striker-2024", &hash).unwrap());
        assert_ne!(hash, hash_password("goalkeeper-2024").unwrap());
    }

    #[test]
    fn corrupt_hash_is_a_server_fault() {
        let err = verify_password("goalkeeper-2024", "plaintext").unwrap_err();
        assert!(matches!(err, PasswordError::CorruptHash));
        assert!(!err.is_policy_violation());
    }
}
