use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use crate::books::repository::memory_book_repository::MemoryBookTable;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
    // rows for RepositoryStore::Memory, shared by every request
    pub(crate) memory: MemoryBookTable,
}

impl AppState {
    pub fn new(config: Configuration, store: RepositoryStore) -> AppState {
        AppState {
            config,
            store,
            memory: MemoryBookTable::new(),
        }
    }
}

pub type ServerError = (StatusCode, Json<Value>);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": format!("{}", err) })))
}

pub(crate) fn not_found(message: String) -> ServerError {
    (StatusCode::NOT_FOUND, Json(json!({ "message": message })))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::InvalidArgument { field, message } => {
                (StatusCode::BAD_REQUEST, Json(json!({ "field": field, "message": message })))
            }
            CommandError::Conflict { message, retryable, .. } => {
                (StatusCode::CONFLICT, Json(json!({ "message": message, "retryable": retryable })))
            }
            CommandError::Database { message, retryable, .. } => {
                tracing::error!(error = message.as_str(), "book store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": message, "retryable": retryable })))
            }
            CommandError::Runtime { message, .. } | CommandError::Serialization { message } => {
                tracing::error!(error = message.as_str(), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": message })))
            }
        }
    }
}
