//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (database queries, validation)
//! 3. Returns HTTP response (JSON, status code)

use serde::Serialize;

/// Health check endpoint
pub mod health;
/// Transaction CRUD endpoints
pub mod transactions;

/// Success envelope carrying a payload.
///
/// ```json
/// { "message": "Transaction created", "data": { ... } }
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

/// Success envelope with no payload (used by delete).
///
/// ```json
/// { "message": "Transaction Deleted" }
/// ```
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
