//! Session tokens and identity snapshots.

use parking_lot::RwLock;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use quill_blog::UserId;

/// Length of a session token in characters.
pub const SESSION_TOKEN_LEN: usize = 32;

/// The identity a request acts as.
///
/// This is a snapshot captured at login: it is passed explicitly into
/// every operation that needs it, so there is no ambient per-request
/// state, and every handler's authorization dependency shows up in its
/// signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// User ID if authenticated.
    pub user_id: Option<UserId>,
    /// Username if authenticated.
    pub username: Option<String>,
    /// Whether the caller is logged in.
    pub logged_in: bool,
}

impl Identity {
    /// Create an anonymous identity.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            username: None,
            logged_in: false,
        }
    }

    /// Create an authenticated identity.
    pub fn authenticated(user_id: UserId, username: String) -> Self {
        Self {
            user_id: Some(user_id),
            username: Some(username),
            logged_in: true,
        }
    }
}

/// Maps opaque session tokens to identity snapshots.
///
/// The snapshot is trusted for the life of the session: it is not
/// re-resolved against the user store per request, so a user removed
/// after login stays authenticated until the session is destroyed. That
/// tradeoff is confined to this type; [`SessionStore::revoke_user`] is
/// the hook for deployments that want removal to end sessions at once.
///
/// No automatic expiry is modeled here; an outer transport owns that.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Identity>>>,
}

impl SessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a fresh token to an authenticated identity.
    ///
    /// Called on successful login or registration. Returns the opaque
    /// token the client holds.
    pub fn create(&self, user_id: UserId, username: String) -> String {
        let token = generate_token();
        self.sessions
            .write()
            .insert(token.clone(), Identity::authenticated(user_id, username));
        token
    }

    /// Resolve a token to its identity.
    ///
    /// A missing or unknown token resolves to [`Identity::anonymous`];
    /// resolution never fails.
    pub fn resolve(&self, token: Option<&str>) -> Identity {
        let Some(token) = token else {
            return Identity::anonymous();
        };
        self.sessions
            .read()
            .get(token)
            .cloned()
            .unwrap_or_else(Identity::anonymous)
    }

    /// Destroy a session, returning the caller to anonymous.
    ///
    /// Unconditional: the binding is cleared whether or not the token
    /// was known, so logout can never leave a caller effectively
    /// authenticated. Returns whether a session existed.
    pub fn destroy(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }

    /// Drop every session bound to a user.
    ///
    /// Used when a user is removed so their sessions end with them.
    /// Returns the number of sessions dropped.
    pub fn revoke_user(&self, user_id: UserId) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, identity| identity.user_id != Some(user_id));
        before - sessions.len()
    }

    /// Count active sessions.
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Generate a random alphanumeric session token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();

    (0..SESSION_TOKEN_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..62);
            if idx < 10 {
                (b'0' + idx) as char
            } else if idx < 36 {
                (b'a' + idx - 10) as char
            } else {
                (b'A' + idx - 36) as char
            }
        })
        .collect()
}
