//! API error type with automatic HTTP status mapping.
//!
//! Every failure becomes `{"error": <message>}`. Store and internal errors
//! are logged in full and reported to the client generically.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use todo_core::QueryError;

use crate::store::StoreError;

pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required field absent or nothing to update (400)
    #[error("{0}")]
    Validation(String),

    /// Identifier matched no row (404)
    #[error("{0}")]
    NotFound(String),

    /// Connectivity, constraint, or execution failure (500, logged)
    #[error("database error: {0}")]
    Database(#[from] StoreError),

    /// Store returned something unexpected (500, logged)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database error");
                INTERNAL_SERVER_ERROR.to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                INTERNAL_SERVER_ERROR.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(e: QueryError) -> Self {
        match &e {
            QueryError::Validation(msg) => ApiError::Validation(msg.to_string()),
            QueryError::NotFound(msg) => ApiError::NotFound(msg.to_string()),
            QueryError::NoRows | QueryError::MalformedRow(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}
