//! User account types and registration validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a user.
pub type UserId = u64;

/// Minimum username length in characters.
pub const USERNAME_MIN_CHARS: usize = 3;
/// Maximum username length in characters.
pub const USERNAME_MAX_CHARS: usize = 10;
/// Minimum password length in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Maximum password length in characters.
pub const PASSWORD_MAX_CHARS: usize = 70;

/// Regex for valid usernames: ASCII letters and digits only.
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("Invalid regex"));

/// A user account.
///
/// Usernames are unique across all users (case-sensitive exact match) and
/// immutable after creation, as is the id. The password hash never leaves
/// this crate.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Unique username (3-10 ASCII alphanumeric characters).
    pub username: String,
    /// Argon2id hash of the password. Never exposed outside the store.
    #[serde(skip_serializing)]
    pub(crate) password_hash: String,
    /// Unix timestamp when created.
    pub created_at: u64,
}

impl User {
    /// Create a new user with an already-hashed password.
    pub(crate) fn new(id: UserId, username: String, password_hash: String) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        Self {
            id,
            username,
            password_hash,
            created_at: now,
        }
    }
}

/// Validate a registration submission.
///
/// All checks run and their messages accumulate; an empty list means the
/// submission may be persisted. The username is expected to be trimmed by
/// the caller.
///
/// Rules:
/// - Username present
/// - Username 3-10 characters
/// - Username ASCII alphanumeric only
/// - Password 8-70 characters
pub fn validate_registration(username: &str, password: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if username.is_empty() {
        errors.push("You must provide a username".to_string());
    }

    let username_len = username.chars().count();
    if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_len) {
        errors.push("Username must be 3-10 characters".to_string());
    }

    if !USERNAME_REGEX.is_match(username) {
        errors.push("Username can only contain letters and numbers".to_string());
    }

    let password_len = password.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&password_len) {
        errors.push("Password must be 8-70 characters".to_string());
    }

    errors
}
