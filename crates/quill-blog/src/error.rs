//! Error types for the blog core.

use thiserror::Error;

/// Result type for blog operations.
pub type Result<T> = std::result::Result<T, BlogError>;

/// Errors that can occur in the blog core.
///
/// Every expected failure mode is a variant here rather than a panic or an
/// opaque fault; callers turn these into user-facing messages at the point
/// of detection.
#[derive(Debug, Error)]
pub enum BlogError {
    /// One or more validation failures, accumulated in submission order.
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),

    /// Username already exists.
    #[error("username already taken")]
    DuplicateUsername,

    /// Login failed. One uniform variant for both "no such user" and
    /// "wrong password" so callers cannot tell which occurred.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Post not found, or (on conditioned update) not owned by the caller.
    #[error("post not found")]
    PostNotFound,

    /// Caller is not the owner of the post being deleted.
    #[error("not the post owner")]
    Forbidden,

    /// Storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl BlogError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::DuplicateUsername => 409,
            Self::InvalidCredentials => 401,
            Self::PostNotFound => 404,
            Self::Forbidden => 403,
            Self::Storage(_) => 500,
            Self::Crypto(_) => 500,
        }
    }

    /// Get the user-facing message for this error.
    ///
    /// `Validation` carries its own accumulated messages; faults never
    /// expose internal detail.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            Self::Validation(messages) => messages.clone(),
            Self::DuplicateUsername => vec!["That username is already taken".to_string()],
            Self::InvalidCredentials => vec!["Invalid username or password".to_string()],
            Self::PostNotFound => vec!["Post not found".to_string()],
            Self::Forbidden => {
                vec!["You are not authorized to delete this post".to_string()]
            }
            Self::Storage(_) | Self::Crypto(_) => {
                vec!["An error occurred. Please try again.".to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(BlogError::Validation(vec![]).status_code(), 422);
        assert_eq!(BlogError::DuplicateUsername.status_code(), 409);
        assert_eq!(BlogError::InvalidCredentials.status_code(), 401);
        assert_eq!(BlogError::PostNotFound.status_code(), 404);
        assert_eq!(BlogError::Forbidden.status_code(), 403);
        assert_eq!(BlogError::Storage("x".into()).status_code(), 500);
    }

    #[test]
    fn test_fault_messages_are_generic() {
        let messages = BlogError::Storage("connection reset".into()).user_messages();
        assert_eq!(messages, vec!["An error occurred. Please try again."]);
        let messages = BlogError::Crypto("bad hash".into()).user_messages();
        assert_eq!(messages, vec!["An error occurred. Please try again."]);
    }
}
