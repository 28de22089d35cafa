//! Password hashing with Argon2id.
//!
//! The hash function is the only computationally expensive step in the
//! credential path; it is salted per password and parameterized by the
//! Argon2 defaults.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

use crate::error::{BlogError, Result};

/// Hash used to equalize the cost of login attempts against unknown
/// usernames with attempts against known ones.
static DUMMY_HASH: Lazy<String> =
    Lazy::new(|| hash_password("quill-dummy-password").unwrap_or_default());

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| BlogError::Crypto(e.to_string()))
}

/// Verify a password against a stored hash.
///
/// A mismatch is reported as [`BlogError::InvalidCredentials`]; a
/// malformed stored hash is a crypto fault.
pub fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| BlogError::Crypto(e.to_string()))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| BlogError::InvalidCredentials)
}

/// Burn one verification against a static hash.
///
/// Called on username-lookup misses so the miss path takes the same time
/// as a wrong-password attempt.
pub fn burn_verification(password: &str) {
    let _ = verify_password(password, &DUMMY_HASH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_is_invalid_credentials() {
        let hash = hash_password("correct horse battery").unwrap();
        let err = verify_password("wrong password", &hash).unwrap_err();
        assert!(matches!(err, BlogError::InvalidCredentials));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_burn_verification_does_not_panic() {
        burn_verification("anything at all");
    }
}
