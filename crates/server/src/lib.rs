use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::error::ErrorResponse;

pub use server::{Credentials, ServerState, router, run_with_listener, spawn_with_listener};

mod budgets;
mod server;

/// Errors a request handler can answer with.
pub enum ServerError {
    NotFound(String),
    Validation(String),
    Engine(EngineError),
}

impl From<EngineError> for ServerError {
    fn from(err: EngineError) -> Self {
        ServerError::Engine(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            ServerError::Validation(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ServerError::Engine(err) => {
                tracing::error!("storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
