//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the caller does the round-trip in between.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, TodoId};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos".to_string())
    }

    pub fn build_create_todo(&self, text: &str) -> Result<HttpRequest, ApiError> {
        let input = CreateTodo {
            text: text.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut req = self.request(HttpMethod::Post, "/todos".to_string());
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_complete_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Patch, format!("/todos/{id}/complete"))
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/todos/{id}"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        decode(&response)
    }

    pub fn parse_complete_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        decode(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, route: String) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{route}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|b| b.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest(message))
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
