//! HTTP front end for the todo store.
//!
//! Routes are mounted twice, at `/todos` and under `/api`, so both the bare
//! API and the browser client's `/api/todos` paths work. Store calls touch the
//! filesystem and run on the blocking pool.

pub mod config;
pub mod error;
pub mod frontend;

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path as UrlPath, State},
    http::StatusCode,
    response::Html,
    routing::{delete, get, patch},
    Json, Router,
};
use todo_core::{CreateTodo, Todo, TodoError, TodoResult, TodoService};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;

pub type SharedService = Arc<TodoService>;

/// Router with the embedded browser client at `/`.
pub fn app(service: SharedService) -> Router {
    router(service, None)
}

/// Router that serves `static_dir` for every non-API path when given.
pub fn router(service: SharedService, static_dir: Option<&Path>) -> Router {
    let todos = Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}/complete", patch(complete_todo))
        .route("/todos/{id}", delete(delete_todo));

    let app = Router::new().merge(todos.clone()).nest("/api", todos);
    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(index)),
    };

    app.layer(TraceLayer::new_for_http()).with_state(service)
}

/// Serve `router` until Ctrl-C.
pub async fn run(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for ctrl-c, running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn with_service<T, F>(service: SharedService, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&TodoService) -> TodoResult<T> + Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || op(&service)).await??)
}

async fn index() -> Html<&'static str> {
    Html(frontend::INDEX_HTML)
}

async fn list_todos(State(service): State<SharedService>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = with_service(service, |s| s.list_all()).await?;
    Ok(Json(todos))
}

async fn create_todo(
    State(service): State<SharedService>,
    input: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let Json(input) = input.map_err(|e| TodoError::InvalidInput(e.body_text()))?;
    let todo = with_service(service, move |s| s.create(&input.text)).await?;
    tracing::info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn complete_todo(
    State(service): State<SharedService>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Todo>, AppError> {
    let todo = with_service(service, move |s| s.complete(&id)).await?;
    Ok(Json(todo))
}

async fn delete_todo(
    State(service): State<SharedService>,
    UrlPath(id): UrlPath<String>,
) -> Result<StatusCode, AppError> {
    let removed = with_service(service, move |s| s.delete(&id)).await?;
    tracing::info!(id = removed.id, "deleted todo");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_requires_only_text() {
        let input: CreateTodo = serde_json::from_str(r#"{"text":"Buy milk","extra":1}"#).unwrap();
        assert_eq!(input.text, "Buy milk");
    }

    #[test]
    fn create_payload_rejects_non_string_text() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"text":42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn index_page_talks_to_the_todo_routes() {
        assert!(frontend::INDEX_HTML.contains("/complete"));
        assert!(frontend::INDEX_HTML.contains("const API = 'todos'"));
    }
}
