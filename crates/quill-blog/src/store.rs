//! Durable storage for users and posts.
//!
//! The stores are the only shared mutable resource in the system. Each
//! conditioned mutation (update or delete gated on identifier AND owner)
//! is performed under a single write lock so the ownership check and the
//! mutation are one atomic step, never a read-then-write.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::{BlogError, Result};
use crate::password::{burn_verification, hash_password, verify_password};
use crate::post::{Post, PostId};
use crate::user::{validate_registration, User, UserId};

/// Blog data store.
#[derive(Debug, Clone)]
pub struct BlogStore {
    /// User storage (the credential store).
    pub users: UserStore,
    /// Post storage.
    pub posts: PostStore,
}

impl Default for BlogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlogStore {
    /// Create a new empty blog store.
    pub fn new() -> Self {
        Self {
            users: UserStore::new(),
            posts: PostStore::new(),
        }
    }

    /// Remove a user and cascade to their posts.
    ///
    /// A post cannot outlive its author. Returns the number of posts
    /// removed, or `None` when no such user exists. There is no
    /// account-management route over this; it exists at the store level
    /// for operators and tests.
    pub fn remove_user(&self, id: UserId) -> Option<usize> {
        let user = self.users.remove(id)?;
        let removed = self.posts.remove_by_author(user.id);
        Some(removed)
    }

    /// Get statistics about stored data.
    pub fn stats(&self) -> BlogStats {
        BlogStats {
            users: self.users.count(),
            posts: self.posts.count(),
        }
    }
}

/// User storage and credential verification.
#[derive(Debug, Clone)]
pub struct UserStore {
    /// Users by ID.
    users: Arc<RwLock<HashMap<UserId, User>>>,
    /// Username to ID index. Guarded by the same write lock discipline
    /// as `users`: registration takes both writes before the uniqueness
    /// check so insert-after-check cannot race.
    username_index: Arc<RwLock<HashMap<String, UserId>>>,
    /// Next user ID.
    next_id: Arc<AtomicU64>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    /// Create a new user store.
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            username_index: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Register a new user.
    ///
    /// Pre-checks accumulate into one [`BlogError::Validation`] and
    /// nothing is persisted when any are present. A uniqueness conflict
    /// surfaces as [`BlogError::DuplicateUsername`], never a storage
    /// fault. This is the only writer of user records.
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();

        let errors = validate_registration(username, password);
        if !errors.is_empty() {
            return Err(BlogError::Validation(errors));
        }

        // Hash before taking the locks; this is the slow step.
        let password_hash = hash_password(password)?;

        let mut users = self.users.write();
        let mut username_index = self.username_index.write();

        if username_index.contains_key(username) {
            return Err(BlogError::DuplicateUsername);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(id, username.to_string(), password_hash);

        username_index.insert(username.to_string(), id);
        users.insert(id, user.clone());

        Ok(user)
    }

    /// Verify a login attempt.
    ///
    /// Exact-match lookup by username. Both "no such user" and "wrong
    /// password" yield the same [`BlogError::InvalidCredentials`], and
    /// the miss path still pays a hash verification so the two cases are
    /// indistinguishable by message or timing.
    pub fn verify(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(BlogError::InvalidCredentials);
        }

        let user = self.get_by_username(username);

        match user {
            Some(user) => {
                verify_password(password, &user.password_hash)?;
                Ok(user)
            }
            None => {
                burn_verification(password);
                Err(BlogError::InvalidCredentials)
            }
        }
    }

    /// Get a user by ID.
    pub fn get(&self, id: UserId) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    /// Get a user by username (case-sensitive exact match).
    pub fn get_by_username(&self, username: &str) -> Option<User> {
        let username_index = self.username_index.read();
        let id = username_index.get(username)?;
        self.users.read().get(id).cloned()
    }

    /// Remove a user. Callers cascade via [`BlogStore::remove_user`].
    pub fn remove(&self, id: UserId) -> Option<User> {
        let mut users = self.users.write();
        let mut username_index = self.username_index.write();

        let user = users.remove(&id)?;
        username_index.remove(&user.username);
        Some(user)
    }

    /// Count users.
    pub fn count(&self) -> usize {
        self.users.read().len()
    }
}

/// Post storage with ownership-conditioned mutation.
#[derive(Debug, Clone)]
pub struct PostStore {
    /// Posts by ID.
    posts: Arc<RwLock<HashMap<PostId, Post>>>,
    /// Next post ID.
    next_id: Arc<AtomicU64>,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    /// Create a new post store.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Create a post. The store stamps `created_at` at acceptance.
    ///
    /// Title and body are expected to have passed sanitization already;
    /// the caller must not persist an invalid submission.
    pub fn create(&self, author_id: UserId, title: String, body: String) -> Post {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = Post::new(id, author_id, title, body);

        self.posts.write().insert(id, post.clone());
        post
    }

    /// Get a post by ID.
    pub fn get(&self, id: PostId) -> Option<Post> {
        self.posts.read().get(&id).cloned()
    }

    /// Get a post only if the caller owns it (the edit-form fetch).
    pub fn get_owned(&self, id: PostId, caller_id: UserId) -> Option<Post> {
        self.posts
            .read()
            .get(&id)
            .filter(|p| p.author_id == caller_id)
            .cloned()
    }

    /// List a user's posts, newest first.
    ///
    /// Returns an empty list when the user has no posts; "no posts" is
    /// never an error.
    pub fn list_by_author(&self, author_id: UserId) -> Vec<Post> {
        let mut posts: Vec<_> = self
            .posts
            .read()
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        posts
    }

    /// Update a post's title and body, conditioned on ownership.
    ///
    /// The match on id AND author happens under one write lock, so
    /// ownership cannot be checked against stale state. Zero matches
    /// yield [`BlogError::PostNotFound`] whether the post is missing or
    /// owned by someone else; callers cannot distinguish the two, which
    /// keeps other users' post ids from being probed through the edit
    /// path.
    pub fn update(
        &self,
        id: PostId,
        caller_id: UserId,
        title: String,
        body: String,
    ) -> Result<Post> {
        let mut posts = self.posts.write();

        match posts.get_mut(&id) {
            Some(post) if post.author_id == caller_id => {
                post.title = title;
                post.body = body;
                Ok(post.clone())
            }
            _ => Err(BlogError::PostNotFound),
        }
    }

    /// Delete a post.
    ///
    /// Unlike `update`, deletion resolves the true author first and is
    /// explicit about authorization failure: a missing post is
    /// [`BlogError::PostNotFound`], an ownership mismatch is
    /// [`BlogError::Forbidden`]. The asymmetry with `update` is
    /// deliberate and pinned by tests.
    pub fn delete(&self, id: PostId, caller_id: UserId) -> Result<Post> {
        let mut posts = self.posts.write();

        let author_id = match posts.get(&id) {
            Some(post) => post.author_id,
            None => return Err(BlogError::PostNotFound),
        };

        if author_id != caller_id {
            return Err(BlogError::Forbidden);
        }

        // Still holding the write lock, so the resolve above cannot go
        // stale before the remove.
        posts.remove(&id).ok_or(BlogError::PostNotFound)
    }

    /// Remove every post by an author. Returns the number removed.
    pub fn remove_by_author(&self, author_id: UserId) -> usize {
        let mut posts = self.posts.write();
        let before = posts.len();
        posts.retain(|_, p| p.author_id != author_id);
        before - posts.len()
    }

    /// Count posts.
    pub fn count(&self) -> usize {
        self.posts.read().len()
    }
}

/// Statistics about stored data.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BlogStats {
    /// Number of users.
    pub users: usize,
    /// Number of posts.
    pub posts: usize,
}
