//! # Quill Session
//!
//! Session management and authorization for the Quill blogging backend.
//!
//! This crate provides:
//! - **Identity**: The snapshot of who a request is acting as
//! - **Session Store**: Opaque token to identity mapping with login/logout
//! - **Authorization Guard**: The ownership predicate gating mutation
//!
//! ## Example
//!
//! ```rust
//! use quill_session::{can_mutate, SessionStore};
//!
//! let sessions = SessionStore::new();
//!
//! // Login binds an identity to a fresh opaque token
//! let token = sessions.create(1, "alice1".to_string());
//!
//! let identity = sessions.resolve(Some(&token));
//! assert!(identity.logged_in);
//! assert!(can_mutate(&identity, 1));
//! assert!(!can_mutate(&identity, 2));
//!
//! // Logout unconditionally clears the binding
//! sessions.destroy(&token);
//! assert!(!sessions.resolve(Some(&token)).logged_in);
//! ```

pub mod guard;
pub mod session;

pub use guard::can_mutate;
pub use session::{Identity, SessionStore, SESSION_TOKEN_LEN};
