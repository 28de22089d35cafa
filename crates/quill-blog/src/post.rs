//! Post types.

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::user::UserId;

/// Unique identifier for a post.
pub type PostId = u64;

/// A text post owned by a single user.
///
/// `id`, `author_id`, and `created_at` are immutable after creation;
/// `title` and `body` are mutated only through the store's
/// ownership-conditioned update.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Post {
    /// Unique post ID.
    pub id: PostId,
    /// Owning user's ID. Set at creation, immutable.
    pub author_id: UserId,
    /// Unix timestamp stamped by the store at acceptance.
    pub created_at: u64,
    /// Sanitized title (1-100 characters).
    pub title: String,
    /// Sanitized body (1-1000 characters).
    pub body: String,
}

impl Post {
    /// Create a new post, stamping `created_at` with the current time.
    ///
    /// The timestamp is store-observed, never caller-supplied, so it
    /// cannot be forged.
    pub(crate) fn new(id: PostId, author_id: UserId, title: String, body: String) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        Self {
            id,
            author_id,
            created_at: now,
            title,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_stamps_current_time() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let post = Post::new(1, 7, "Hi".to_string(), "World".to_string());
        let after = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        assert!(post.created_at >= before);
        assert!(post.created_at <= after);
        assert_eq!(post.author_id, 7);
    }
}
