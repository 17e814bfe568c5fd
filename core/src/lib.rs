//! Persistent todo store and the pieces around it.
//!
//! # Overview
//! - [`TodoStore`] owns one JSON file holding the whole collection and
//!   rewrites it atomically (temp file + rename) on every mutation.
//! - [`TodoService`] validates raw transport input and delegates to the store.
//! - [`TodoClient`] builds and parses HTTP exchanges for the todo API without
//!   doing any I/O itself.
//!
//! # Design
//! - Ids are derived from the persisted records on every add, so they stay
//!   unique across restarts and deletions.
//! - Every failure is a [`TodoError`] variant; the transport maps variants to
//!   status codes.

pub mod client;
pub mod error;
pub mod http;
pub mod service;
pub mod store;
pub mod types;

pub use client::TodoClient;
pub use error::{ApiError, TodoError, TodoResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{parse_id, TodoService};
pub use store::{next_id, TodoStore};
pub use types::{validate_text, CreateTodo, Todo, TodoId, MAX_TEXT_CHARS};

/// Data file used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "data/todos.json";
