//! HTTP rendering of store and facade errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use todo_core::TodoError;

/// A handler failure, rendered as `{"error": "..."}` with a matching status.
#[derive(Debug)]
pub enum AppError {
    Todo(TodoError),
    /// The blocking store task panicked or was cancelled.
    Task(tokio::task::JoinError),
}

impl From<TodoError> for AppError {
    fn from(err: TodoError) -> Self {
        Self::Todo(err)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Todo(TodoError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AppError::Todo(TodoError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Todo(TodoError::CorruptState { .. } | TodoError::StorageUnavailable { .. })
            | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the request, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Todo(err) if err.is_client_error())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Todo(err) => err.to_string(),
            AppError::Task(err) => format!("background task failed: {err}"),
        };
        if self.is_client_error() {
            tracing::debug!(%status, error = %message, "request rejected");
        } else {
            tracing::error!(%status, error = %message, "request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
