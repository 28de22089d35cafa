//! # Quill Blog Core
//!
//! Domain core for the Quill blogging backend.
//!
//! This crate provides:
//! - **Users**: Registration with validated usernames and Argon2id password hashes
//! - **Posts**: Personally-owned plain-text posts with store-stamped timestamps
//! - **Credential Store**: Username-unique registration and uniform login verification
//! - **Post Store**: Author-scoped queries and ownership-conditioned mutation
//! - **Sanitization**: Markup stripping and length validation for submissions
//!
//! ## Example
//!
//! ```rust
//! use quill_blog::{BlogStore, Submission};
//!
//! // Create a store
//! let store = BlogStore::new();
//!
//! // Register a user
//! let user = store.users.register("alice1", "a strong password").unwrap();
//!
//! // Sanitize and persist a post
//! let submission = Submission::sanitize("Hello", "My <b>first</b> post");
//! assert!(submission.is_valid());
//! let post = store.posts.create(user.id, submission.title, submission.body);
//!
//! // Only the owner may mutate it
//! assert!(store.posts.update(post.id, user.id, "Hello".into(), "Edited".into()).is_ok());
//! ```

pub mod error;
pub mod password;
pub mod post;
pub mod sanitize;
pub mod store;
pub mod user;

// Re-export main types
pub use error::{BlogError, Result};
pub use post::{Post, PostId};
pub use sanitize::{strip_tags, Submission, BODY_MAX_CHARS, TITLE_MAX_CHARS};
pub use store::{BlogStats, BlogStore, PostStore, UserStore};
pub use user::{validate_registration, User, UserId};

/// Version of the blog core.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
