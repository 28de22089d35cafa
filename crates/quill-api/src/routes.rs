//! # Blog API routes
//!
//! JSON endpoints for registration, sessions, and post management.
//!
//! ## Session Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | POST | `/api/register` | Register and log in |
//! | POST | `/api/login` | Log in |
//! | POST | `/api/logout` | Log out |
//! | GET | `/api/session` | Current identity snapshot |
//!
//! ## Post Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/api/posts` | List own posts, newest first |
//! | POST | `/api/posts` | Create a post |
//! | GET | `/api/posts/{id}` | Read a post (public) |
//! | GET | `/api/posts/{id}/edit` | Fetch a post for editing (owner only) |
//! | PUT | `/api/posts/{id}` | Update a post (owner only) |
//! | DELETE | `/api/posts/{id}` | Delete a post (owner only) |
//!
//! Authentication is a bearer session token: `Authorization: Bearer <token>`.
//! Reading a single post works for any caller, logged in or not.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use quill_blog::{BlogStore, Post, PostId, Submission, UserId};
use quill_session::{can_mutate, Identity, SessionStore};

use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Blog data store.
    pub blog: Arc<BlogStore>,
    /// Session store.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create state over fresh stores.
    pub fn new() -> Self {
        Self {
            blog: Arc::new(BlogStore::new()),
            sessions: Arc::new(SessionStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Session endpoints
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/session", get(current_session))
        // Post endpoints
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/api/posts/{id}/edit", get(get_post_for_edit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ==================== Request/Response Types ====================

/// Username/password credentials.
///
/// Absent fields coerce to the empty string so malformed submissions
/// fall through to validation instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Password.
    #[serde(default)]
    pub password: String,
}

/// A raw post submission.
#[derive(Debug, Deserialize)]
pub struct PostSubmissionRequest {
    /// Raw title; sanitized before validation.
    #[serde(default)]
    pub title: String,
    /// Raw body; sanitized before validation.
    #[serde(default)]
    pub body: String,
}

/// Response to a successful login or registration.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Authenticated user's ID.
    pub user_id: UserId,
    /// Authenticated user's name.
    pub username: String,
    /// Opaque session token for the `Authorization` header.
    pub token: String,
}

/// A post as rendered to callers.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: PostId,
    /// Owning user's ID.
    pub author_id: UserId,
    /// Owning user's name, when still resolvable.
    pub author: Option<String>,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Unix timestamp of creation.
    pub created_at: u64,
    /// Whether the current caller may edit or delete this post. Display
    /// gating only; the store enforces ownership on every mutation.
    pub editable: bool,
}

impl PostResponse {
    fn render(state: &AppState, identity: &Identity, post: Post) -> Self {
        let author = state.blog.users.get(post.author_id).map(|u| u.username);
        let editable = can_mutate(identity, post.author_id);
        Self {
            id: post.id,
            author_id: post.author_id,
            author,
            title: post.title,
            body: post.body,
            created_at: post.created_at,
            editable,
        }
    }
}

// ==================== Helper Functions ====================

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    header
        .trim()
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

/// Resolve the caller's identity from the request headers.
fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Identity {
    let token = bearer_token(headers);
    state.sessions.resolve(token.as_deref())
}

/// Require a logged-in caller, yielding their user ID.
fn require_login(identity: &Identity) -> Result<UserId, ApiError> {
    match identity.user_id {
        Some(id) if identity.logged_in => Ok(id),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Parse a post id from the path. Non-numeric ids read as "no such post".
fn parse_post_id(raw: &str) -> Result<PostId, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidPostId)
}

// ==================== Session Handlers ====================

/// Registers a new user and logs them in.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.blog.users.register(&req.username, &req.password)?;
    let token = state.sessions.create(user.id, user.username.clone());

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            user_id: user.id,
            username: user.username,
            token,
        }),
    ))
}

/// Verifies credentials and logs the caller in.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.blog.users.verify(&req.username, &req.password)?;
    let token = state.sessions.create(user.id, user.username.clone());

    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(SessionResponse {
        user_id: user.id,
        username: user.username,
        token,
    }))
}

/// Logs the caller out.
///
/// Always clears the binding and always succeeds: a stale or unknown
/// token must not leave the caller effectively authenticated.
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.destroy(&token);
    }
    StatusCode::NO_CONTENT
}

/// Returns the caller's identity snapshot (anonymous when not logged in).
async fn current_session(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    Json(resolve_identity(&state, &headers))
}

// ==================== Post Handlers ====================

/// Lists the caller's own posts, newest first.
async fn list_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let identity = resolve_identity(&state, &headers);
    let user_id = require_login(&identity)?;

    let posts: Vec<_> = state
        .blog
        .posts
        .list_by_author(user_id)
        .into_iter()
        .map(|p| PostResponse::render(&state, &identity, p))
        .collect();

    Ok(Json(posts))
}

/// Creates a post from a sanitized submission.
async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PostSubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = resolve_identity(&state, &headers);
    let user_id = require_login(&identity)?;

    let submission = Submission::sanitize(&req.title, &req.body);
    if !submission.is_valid() {
        return Err(quill_blog::BlogError::Validation(submission.errors).into());
    }

    let post = state
        .blog
        .posts
        .create(user_id, submission.title, submission.body);

    tracing::info!(post_id = post.id, author_id = user_id, "post created");

    Ok((
        StatusCode::CREATED,
        Json(PostResponse::render(&state, &identity, post)),
    ))
}

/// Reads a single post by id. Anonymous callers are welcome.
async fn get_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = resolve_identity(&state, &headers);
    let id = parse_post_id(&id)?;

    let post = state
        .blog
        .posts
        .get(id)
        .ok_or(quill_blog::BlogError::PostNotFound)?;

    Ok(Json(PostResponse::render(&state, &identity, post)))
}

/// Fetches a post for editing.
///
/// Owner-conditioned read: a missing post and someone else's post both
/// read as not found, matching the conditioned update below.
async fn get_post_for_edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = resolve_identity(&state, &headers);
    let user_id = require_login(&identity)?;
    let id = parse_post_id(&id)?;

    let post = state
        .blog
        .posts
        .get_owned(id, user_id)
        .ok_or(quill_blog::BlogError::PostNotFound)?;

    Ok(Json(PostResponse::render(&state, &identity, post)))
}

/// Updates a post through the ownership-conditioned store operation.
async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<PostSubmissionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = resolve_identity(&state, &headers);
    let user_id = require_login(&identity)?;
    let id = parse_post_id(&id)?;

    let submission = Submission::sanitize(&req.title, &req.body);
    if !submission.is_valid() {
        return Err(quill_blog::BlogError::Validation(submission.errors).into());
    }

    let post = state
        .blog
        .posts
        .update(id, user_id, submission.title, submission.body)?;

    tracing::info!(post_id = post.id, author_id = user_id, "post updated");

    Ok(Json(PostResponse::render(&state, &identity, post)))
}

/// Deletes a post. Missing posts and foreign posts answer differently.
async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = resolve_identity(&state, &headers);
    let user_id = require_login(&identity)?;
    let id = parse_post_id(&id)?;

    let post = state.blog.posts.delete(id, user_id)?;

    tracing::info!(post_id = post.id, author_id = user_id, "post deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ==================== Health ====================

/// Liveness probe.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc123"));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_parse_post_id() {
        assert_eq!(parse_post_id("42").unwrap(), 42);
        assert!(parse_post_id("abc").is_err());
        assert!(parse_post_id("-1").is_err());
        assert!(parse_post_id("").is_err());
    }

    #[test]
    fn test_require_login() {
        let identity = Identity::authenticated(1, "alice1".to_string());
        assert_eq!(require_login(&identity).unwrap(), 1);
        assert!(require_login(&Identity::anonymous()).is_err());
    }
}
