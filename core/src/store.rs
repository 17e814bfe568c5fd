//! File-backed todo collection with atomic writes.
//!
//! # Design
//! The whole collection lives in one pretty-printed JSON array. Every
//! mutation reloads the file, transforms the records in memory and rewrites
//! the full array: first into a sibling `<name>.tmp` file, which is synced,
//! then renamed over the canonical file. The rename is the only step a reader
//! can observe, so readers see the old collection or the new one and nothing
//! in between. A temp file left behind by an interrupted write is never read
//! and is overwritten by the next write.
//!
//! Rewriting everything makes each write O(n) in the collection size. That is
//! fine for a personal todo list and keeps the on-disk format trivial.
//!
//! Ids come from [`next_id`] over the persisted records on every add, never
//! from an in-memory counter, so a deleted id is not handed out again after a
//! restart either.
//!
//! The load-transform-persist sequence runs under `write_lock`. There is no
//! cross-process locking; one process owns one data file.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::error::{TodoError, TodoResult};
use crate::types::{validate_text, Todo, TodoId};

/// Durable CRUD over a single JSON file of todos.
#[derive(Debug)]
pub struct TodoStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

/// The id the next added todo gets: one past the largest existing id, or 1.
///
/// `None` when the largest id is already `TodoId::MAX`.
pub fn next_id(todos: &[Todo]) -> Option<TodoId> {
    match todos.iter().map(|t| t.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Canonical location of the collection.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scratch file each write goes through before the rename.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("todos.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Create the data directory and an empty collection if neither exists.
    ///
    /// Calling this on an initialized store does nothing.
    pub fn initialize(&self) -> TodoResult<()> {
        let _guard = self.lock();
        self.ensure_initialized()
    }

    /// Read the full collection in stored order.
    ///
    /// A missing file is initialized to an empty collection.
    pub fn load_all(&self) -> TodoResult<Vec<Todo>> {
        match self.read_file()? {
            Some(todos) => Ok(todos),
            None => {
                let _guard = self.lock();
                self.load_locked()
            }
        }
    }

    /// Append a new, uncompleted todo and return it.
    ///
    /// `text` is validated before the file is touched.
    pub fn add(&self, text: &str) -> TodoResult<Todo> {
        let text = validate_text(text)?;

        let _guard = self.lock();
        let mut todos = self.load_locked()?;
        let id = next_id(&todos)
            .ok_or_else(|| self.corrupt("no todo ids left after the largest one".to_string()))?;
        let todo = Todo::new(id, text);
        todos.push(todo.clone());
        self.persist(&todos)?;

        debug!(id = todo.id, "added todo");
        Ok(todo)
    }

    /// Flip `completed` on the todo with `id` and return the updated record.
    pub fn toggle_complete(&self, id: TodoId) -> TodoResult<Todo> {
        let (updated, _) = self.update_completed(id, |completed| !completed)?;
        debug!(id, completed = updated.completed, "toggled todo");
        Ok(updated)
    }

    /// Set `completed` on the todo with `id` to a fixed value.
    ///
    /// Returns the record and whether it changed. An unchanged record is not
    /// rewritten.
    pub fn set_completed(&self, id: TodoId, completed: bool) -> TodoResult<(Todo, bool)> {
        let (updated, changed) = self.update_completed(id, |_| completed)?;
        debug!(id, completed, changed, "set todo completion");
        Ok((updated, changed))
    }

    fn update_completed(&self, id: TodoId, next: impl FnOnce(bool) -> bool) -> TodoResult<(Todo, bool)> {
        let _guard = self.lock();
        let mut todos = self.load_locked()?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        let completed = next(todo.completed);
        let changed = completed != todo.completed;
        todo.completed = completed;
        let updated = todo.clone();
        if changed {
            self.persist(&todos)?;
        }
        Ok((updated, changed))
    }

    /// Delete the todo with `id`, returning the removed record.
    pub fn remove(&self, id: TodoId) -> TodoResult<Todo> {
        let _guard = self.lock();
        let mut todos = self.load_locked()?;
        let index = todos
            .iter()
            .position(|t| t.id == id)
            .ok_or(TodoError::NotFound(id))?;
        let removed = todos.remove(index);
        self.persist(&todos)?;

        debug!(id, "removed todo");
        Ok(removed)
    }

    // Poisoning only means another writer panicked; the file is still whole.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Caller must hold `write_lock`.
    fn ensure_initialized(&self) -> TodoResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| unavailable(dir, source))?;
        }
        match fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "initializing empty todo collection");
                self.persist(&[])
            }
            Err(source) => Err(unavailable(&self.path, source)),
        }
    }

    /// Caller must hold `write_lock`.
    fn load_locked(&self) -> TodoResult<Vec<Todo>> {
        self.ensure_initialized()?;
        Ok(self.read_file()?.unwrap_or_default())
    }

    /// `None` when the file does not exist yet.
    fn read_file(&self) -> TodoResult<Option<Vec<Todo>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(unavailable(&self.path, source)),
        };
        self.parse(&raw).map(Some)
    }

    fn parse(&self, raw: &str) -> TodoResult<Vec<Todo>> {
        let todos: Vec<Todo> = serde_json::from_str(raw).map_err(|e| self.corrupt(e.to_string()))?;

        if todos.iter().any(|t| t.id == 0) {
            return Err(self.corrupt("todo id 0 is not a valid id".to_string()));
        }
        let mut seen = HashSet::with_capacity(todos.len());
        if let Some(dup) = todos.iter().find(|t| !seen.insert(t.id)) {
            return Err(self.corrupt(format!("duplicate todo id {}", dup.id)));
        }
        Ok(todos)
    }

    /// Caller must hold `write_lock`.
    fn persist(&self, todos: &[Todo]) -> TodoResult<()> {
        let json = serde_json::to_string_pretty(todos).map_err(|e| unavailable(&self.path, e.into()))?;

        let tmp = self.temp_path();
        write_synced(&tmp, json.as_bytes()).map_err(|source| unavailable(&tmp, source))?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(unavailable(&self.path, source));
        }

        debug!(path = %self.path.display(), count = todos.len(), "persisted todos");
        Ok(())
    }

    fn corrupt(&self, reason: String) -> TodoError {
        warn!(path = %self.path.display(), %reason, "todo collection is corrupt");
        TodoError::CorruptState {
            path: self.path.clone(),
            reason,
        }
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn unavailable(path: &Path, source: io::Error) -> TodoError {
    TodoError::StorageUnavailable {
        path: path.to_path_buf(),
        source,
    }
}
