//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use sqlx::error::ErrorKind;

/// Field-level validation failures, keyed by field name.
///
/// Serializes to the map clients receive as a 422 body:
///
/// ```json
/// {
///   "title": ["The title must be at least 3 characters."],
///   "type": ["The selected type is invalid."]
/// }
/// ```
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, Vec<String>>);

impl ValidationErrors {
    /// Record a failure message against a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// True if no field has failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for one field, if any.
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Validation Errors**: Invalid request data, reported per field
/// - **Resource Errors**: Requested transaction not found
/// - **Persistence Errors**: Store-layer failures, discriminated into
///   constraint violations, connectivity failures, and unknown errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more request fields failed validation.
    ///
    /// Returns HTTP 422 Unprocessable Entity with the field map as body.
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// No transaction exists for the requested identifier.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// The store rejected the write with a constraint violation
    /// (unique, foreign key, not-null, or check).
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Constraint violation")]
    Constraint(#[source] sqlx::Error),

    /// The store could not be reached (pool exhausted or closed, I/O failure).
    ///
    /// Returns HTTP 503 Service Unavailable.
    #[error("Store unavailable")]
    Unavailable(#[source] sqlx::Error),

    /// Any other store-layer failure.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Database error")]
    Database(#[source] sqlx::Error),
}

/// Classify a store error into the persistence taxonomy.
///
/// Constraint violations and connectivity failures get their own variants so
/// they surface with distinct status codes instead of a blanket 500. The
/// driver error is kept as the source for logging only and never reaches the
/// client.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => AppError::Constraint(err),
                _ => AppError::Database(err),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::Unavailable(err)
            }
            _ => AppError::Database(err),
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// Validation errors return the bare field map (see [`ValidationErrors`]).
/// All other errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Validation` → 422 Unprocessable Entity
/// - `TransactionNotFound` → 404 Not Found
/// - `Constraint` → 409 Conflict
/// - `Unavailable` → 503 Service Unavailable
/// - `Database` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::Validation(errors) => {
                // The 422 body is the field map itself, not the error envelope
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response();
            }
            AppError::TransactionNotFound => (
                StatusCode::NOT_FOUND,
                "transaction_not_found",
                "Transaction not found".to_string(),
            ),
            AppError::Constraint(ref source) => {
                tracing::error!(error = %source, "store rejected write with constraint violation");
                (
                    StatusCode::CONFLICT,
                    "constraint_violation",
                    "A storage constraint rejected the operation".to_string(),
                )
            }
            AppError::Unavailable(ref source) => {
                tracing::error!(error = %source, "store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store_unavailable",
                    "The store is currently unavailable".to_string(),
                )
            }
            AppError::Database(ref source) => {
                tracing::error!(error = %source, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
