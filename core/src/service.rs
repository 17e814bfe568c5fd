//! Validating facade over [`TodoStore`].
//!
//! Transports hand this layer raw input (body text, path segments) and get
//! back records or a [`TodoError`] whose variant decides the response.

use std::path::PathBuf;

use crate::error::{TodoError, TodoResult};
use crate::store::TodoStore;
use crate::types::{validate_text, Todo, TodoId};

/// The operations a transport exposes: list, create, complete and delete.
#[derive(Debug)]
pub struct TodoService {
    store: TodoStore,
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    /// Build a service over the file at `path`, creating it if needed.
    pub fn open(path: impl Into<PathBuf>) -> TodoResult<Self> {
        let store = TodoStore::new(path);
        store.initialize()?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn list_all(&self) -> TodoResult<Vec<Todo>> {
        self.store.load_all()
    }

    pub fn create(&self, text: &str) -> TodoResult<Todo> {
        let text = validate_text(text)?;
        self.store.add(&text)
    }

    /// Toggle completion of the todo whose id is given in its textual form.
    pub fn complete(&self, id: &str) -> TodoResult<Todo> {
        let id = parse_id(id)?;
        self.store.toggle_complete(id)
    }

    /// Mark the todo completed without ever un-completing it.
    ///
    /// Returns the record and whether this call completed it.
    pub fn mark_done(&self, id: &str) -> TodoResult<(Todo, bool)> {
        let id = parse_id(id)?;
        self.store.set_completed(id, true)
    }

    pub fn delete(&self, id: &str) -> TodoResult<Todo> {
        let id = parse_id(id)?;
        self.store.remove(id)
    }
}

/// Parse a todo id from a path segment or command-line argument.
///
/// Only plain positive decimal integers are accepted.
pub fn parse_id(raw: &str) -> TodoResult<TodoId> {
    let raw = raw.trim();
    let invalid = || TodoError::InvalidInput(format!("invalid todo id: {raw:?}"));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<TodoId>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(id) => Ok(id),
    }
}
