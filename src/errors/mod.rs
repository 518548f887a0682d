//! Error handling module for the VLAN API.
//!
//! Maps validation and storage failures to HTTP status codes and the JSON error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Client-facing messages shared by several handlers.
pub mod messages {
    pub const NOT_FOUND: &str = "VLAN not found";
    pub const CONFLICT: &str = "VLAN with this ID already exists";
    pub const INVALID_BODY: &str = "Invalid request body";
    pub const INVALID_ID: &str = "invalid ID format";
    pub const ID_OUT_OF_RANGE: &str = "ID must be between 1 and 4094";
    pub const ENDPOINT_NOT_FOUND: &str = "Endpoint not found";
    pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Input failed domain validation
    Validation(ValidationError),
    /// VLAN tag already in use
    Conflict(String),
    /// Malformed path or body
    BadRequest(String),
    /// Known path, unsupported HTTP method
    MethodNotAllowed(String),
    /// Storage or runtime failure; the message is safe to show to clients
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::MethodNotAllowed(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Translate a storage failure, using `failure` as the client message for I/O faults.
    pub fn from_storage(err: StorageError, failure: &str) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound(messages::NOT_FOUND.to_string()),
            StorageError::AlreadyExists => AppError::Conflict(messages::CONFLICT.to_string()),
            StorageError::Io { .. } | StorageError::IdsExhausted => {
                tracing::error!("Storage error: {}", err);
                AppError::Internal(failure.to_string())
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            error: error.message(),
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
