//! Domain types for the todo store.
//!
//! # Design
//! `Todo` is both the persisted record and the API payload, so its serde
//! shape is the on-disk layout: camelCase keys, `createdAt` as an RFC 3339
//! string. Older files written by the command-line tool stored `createdAt` as
//! epoch milliseconds; both forms are accepted on load and the string form is
//! always written back.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TodoError;

/// Identifier of a todo. Positive, unique within a collection, never reused.
pub type TodoId = u64;

/// Maximum length of a todo's text, in characters, as submitted.
pub const MAX_TEXT_CHARS: usize = 500;

/// A single todo record.
///
/// Only `completed` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Build a fresh, not-yet-completed record stamped with the current time.
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// persisted with.
    pub fn new(id: TodoId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// Request payload for creating a new todo.
///
/// A missing `text` decodes as empty so the rejection comes from
/// [`validate_text`] with a readable message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub text: String,
}

/// Trim `raw` and check it is usable as a todo's text.
///
/// The length limit applies to `raw` as given, surrounding whitespace
/// included.
pub fn validate_text(raw: &str) -> Result<String, TodoError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(TodoError::InvalidInput("text required".to_string()));
    }
    if raw.chars().count() > MAX_TEXT_CHARS {
        return Err(TodoError::InvalidInput(format!(
            "text too long (max {MAX_TEXT_CHARS} characters)"
        )));
    }
    Ok(text.to_string())
}

mod timestamp {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
            Raw::Text(s) => DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let todo = Todo {
            id: 7,
            text: "Buy milk".to_string(),
            completed: false,
            created_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20.123Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn created_at_accepts_epoch_millis() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":1,"text":"Old","completed":true,"createdAt":1700000000123}"#,
        )
        .unwrap();
        assert_eq!(todo.created_at.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn created_at_rejects_garbage() {
        let result: Result<Todo, _> = serde_json::from_str(
            r#"{"id":1,"text":"Bad","completed":false,"createdAt":"yesterday"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_todo_survives_persisted_precision() {
        let todo = Todo::new(3, "Pay bills".to_string());
        let json = serde_json::to_string(&todo).unwrap();
        let back: Todo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, todo);
        assert!(!back.completed);
    }

    #[test]
    fn create_todo_missing_text_is_empty() {
        let input: CreateTodo = serde_json::from_str("{}").unwrap();
        assert!(input.text.is_empty());
    }

    #[test]
    fn validate_text_trims() {
        assert_eq!(validate_text("  Walk dog \n").unwrap(), "Walk dog");
    }

    #[test]
    fn validate_text_rejects_blank() {
        for raw in ["", "   ", "\t\n"] {
            let err = validate_text(raw).unwrap_err();
            assert!(matches!(err, TodoError::InvalidInput(ref m) if m == "text required"));
        }
    }

    #[test]
    fn validate_text_length_limit_counts_characters() {
        assert!(validate_text(&"a".repeat(MAX_TEXT_CHARS)).is_ok());
        assert!(validate_text(&"é".repeat(MAX_TEXT_CHARS)).is_ok());
        let err = validate_text(&"a".repeat(MAX_TEXT_CHARS + 1)).unwrap_err();
        assert!(matches!(err, TodoError::InvalidInput(ref m) if m.contains("too long")));
    }

    #[test]
    fn validate_text_length_limit_includes_padding() {
        let padded = format!(" {}", "a".repeat(MAX_TEXT_CHARS));
        let err = validate_text(&padded).unwrap_err();
        assert!(matches!(err, TodoError::InvalidInput(ref m) if m.contains("too long")));
    }
}
