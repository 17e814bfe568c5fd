//! Error types for the todo store and the todo API client.
//!
//! # Design
//! `TodoError` is the store/facade taxonomy. `InvalidInput` and `NotFound`
//! are caller errors and are always raised before anything is written, so a
//! failed call never leaves the collection mutated. `CorruptState` and
//! `StorageUnavailable` are operator problems and are never repaired
//! automatically.
//!
//! `ApiError` is what `TodoClient` parse methods return. `NotFound` and
//! `BadRequest` get dedicated variants because callers branch on them; every
//! other unexpected status lands in `HttpError` with the raw status and body.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TodoId;

/// Alias for `Result<T, TodoError>`.
pub type TodoResult<T> = Result<T, TodoError>;

/// Errors returned by `TodoStore` and `TodoService`.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Bad, missing or oversized text, or an id that is not a positive integer.
    #[error("{0}")]
    InvalidInput(String),

    /// No record carries the requested id.
    #[error("todo {0} not found")]
    NotFound(TodoId),

    /// The data file exists but does not hold a valid collection.
    #[error("corrupt todo state in {}: {reason}", path.display())]
    CorruptState { path: PathBuf, reason: String },

    /// The data file or its directory cannot be created, read or written.
    #[error("todo storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TodoError {
    /// True for errors caused by the caller's input rather than the store.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TodoError::InvalidInput(_) | TodoError::NotFound(_))
    }
}

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400 with the given message.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
