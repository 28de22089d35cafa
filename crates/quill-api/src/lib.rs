//! # Quill API
//!
//! HTTP JSON API for the Quill blogging backend.
//!
//! This crate wires HTTP verbs and paths to the blog core: it resolves
//! the caller's identity from the bearer token, runs submissions through
//! the sanitizing validator, and delegates the durable operation to the
//! stores. Handlers stay thin; ownership enforcement lives in the store
//! layer with the guard as an extra gate.

pub mod error;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use routes::{create_router, AppState};
