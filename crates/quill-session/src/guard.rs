//! Ownership authorization guard.

use quill_blog::UserId;

use crate::session::Identity;

/// Whether `identity` may mutate a resource owned by `owner_id`.
///
/// True iff the caller is logged in and is the owner. Pure; used to gate
/// edit/delete at the handler level as defense-in-depth on top of the
/// store's own ownership-conditioned operations.
pub fn can_mutate(identity: &Identity, owner_id: UserId) -> bool {
    identity.logged_in && identity.user_id == Some(owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_can_mutate() {
        let identity = Identity::authenticated(1, "alice1".to_string());
        assert!(can_mutate(&identity, 1));
    }

    #[test]
    fn test_non_owner_cannot_mutate() {
        let identity = Identity::authenticated(1, "alice1".to_string());
        assert!(!can_mutate(&identity, 2));
    }

    #[test]
    fn test_anonymous_cannot_mutate() {
        assert!(!can_mutate(&Identity::anonymous(), 1));
    }

    #[test]
    fn test_logged_out_flag_wins() {
        // A stale snapshot with the flag cleared must not authorize.
        let identity = Identity {
            user_id: Some(1),
            username: Some("alice1".to_string()),
            logged_in: false,
        };
        assert!(!can_mutate(&identity, 1));
    }
}
