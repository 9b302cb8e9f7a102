//! Transaction HTTP handlers.
//!
//! This module implements the transaction CRUD endpoints:
//! - GET /transactions - List all transactions, most recent first
//! - POST /transactions - Record a new transaction
//! - GET /transactions/:id - Get transaction details
//! - PUT/PATCH /transactions/:id - Update a transaction
//! - DELETE /transactions/:id - Delete a transaction

use crate::{
    db::DbPool,
    error::AppError,
    handlers::{DataResponse, MessageResponse},
    models::transaction::{Transaction, TransactionPayload},
    services::transaction_service,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// List all transactions.
///
/// # Response (200)
///
/// ```json
/// {
///   "message": "List transaction order by time",
///   "data": [
///     { "id": 2, "title": "Salary", "amount": 900000, "type": "revenue", ... },
///     { "id": 1, "title": "Groceries", "amount": 5000, "type": "expense", ... }
///   ]
/// }
/// ```
///
/// # Ordering
///
/// Transactions are returned ordered by their ledger time, newest first.
pub async fn list_transactions(
    State(pool): State<DbPool>,
) -> Result<Json<DataResponse<Vec<Transaction>>>, AppError> {
    let transactions = transaction_service::list_transactions(&pool).await?;

    Ok(Json(DataResponse {
        message: "List transaction order by time".to_string(),
        data: transactions,
    }))
}

/// Record a new transaction.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Groceries",
///   "amount": 5000,
///   "type": "expense"
/// }
/// ```
///
/// `time` may be supplied; when absent the server assigns the current time.
///
/// # Response
///
/// - **Success (201 Created)**: the created record under `data`
/// - **Error (422)**: field validation failures as a `{field: [messages]}` map
pub async fn create_transaction(
    State(pool): State<DbPool>,
    Json(payload): Json<TransactionPayload>,
) -> Result<(StatusCode, Json<DataResponse<Transaction>>), AppError> {
    // Validation runs before any persistence
    let fields = payload.validate().map_err(AppError::Validation)?;

    let transaction = transaction_service::create_transaction(&pool, fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            message: "Transaction created".to_string(),
            data: transaction,
        }),
    ))
}

/// Get transaction by ID.
///
/// # Response
///
/// - **Success (200 OK)**: the record under `data`
/// - **Error (404)**: no transaction has that identifier
pub async fn get_transaction(
    State(pool): State<DbPool>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<DataResponse<Transaction>>, AppError> {
    let transaction = transaction_service::get_transaction_by_id(&pool, transaction_id)
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    Ok(Json(DataResponse {
        message: "Detail transaction".to_string(),
        data: transaction,
    }))
}

/// Update a transaction in place.
///
/// Overwrites title, amount, and type; the identifier and ledger time are
/// untouched.
///
/// # Response
///
/// - **Success (200 OK)**: the updated record under `data`
/// - **Error (404)**: no transaction has that identifier
/// - **Error (422)**: field validation failures
pub async fn update_transaction(
    State(pool): State<DbPool>,
    Path(transaction_id): Path<i64>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Json<DataResponse<Transaction>>, AppError> {
    // The record is resolved first, so an unknown identifier reports 404
    // even when the body is also invalid
    transaction_service::get_transaction_by_id(&pool, transaction_id)
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    let fields = payload.validate().map_err(AppError::Validation)?;

    let transaction = transaction_service::update_transaction(&pool, transaction_id, fields).await?;

    Ok(Json(DataResponse {
        message: "Transaction Updated".to_string(),
        data: transaction,
    }))
}

/// Permanently delete a transaction.
///
/// # Response
///
/// - **Success (200 OK)**: confirmation message, no data payload
/// - **Error (404)**: no transaction has that identifier
pub async fn delete_transaction(
    State(pool): State<DbPool>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    transaction_service::delete_transaction(&pool, transaction_id).await?;

    Ok(Json(MessageResponse {
        message: "Transaction Deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        routing::{get, post, put},
    };
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::db;

    use super::*;

    async fn test_server() -> TestServer {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Could not open database in memory.");
        db::run_migrations(&pool)
            .await
            .expect("Could not run migrations.");

        let app = Router::new()
            .route("/transactions", get(list_transactions))
            .route("/transactions", post(create_transaction))
            .route("/transactions/{id}", get(get_transaction))
            .route(
                "/transactions/{id}",
                put(update_transaction)
                    .patch(update_transaction)
                    .delete(delete_transaction),
            )
            .with_state(pool);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn crud_flow_end_to_end() {
        let server = test_server().await;

        // Create
        let created = server
            .post("/transactions")
            .json(&json!({ "title": "Groceries", "amount": 5000, "type": "expense" }))
            .await;
        created.assert_status(StatusCode::CREATED);

        let created = created.json::<Value>();
        assert_eq!(created["message"], "Transaction created");
        assert_eq!(created["data"]["title"], "Groceries");
        assert_eq!(created["data"]["amount"], 5000);
        assert_eq!(created["data"]["type"], "expense");
        let id = created["data"]["id"].as_i64().expect("id should be an integer");

        // Read back
        let fetched = server.get(&format!("/transactions/{id}")).await;
        fetched.assert_status_ok();

        let fetched = fetched.json::<Value>();
        assert_eq!(fetched["message"], "Detail transaction");
        assert_eq!(fetched["data"]["title"], "Groceries");
        assert_eq!(fetched["data"]["amount"], 5000);

        // Update
        let updated = server
            .put(&format!("/transactions/{id}"))
            .json(&json!({ "title": "Food", "amount": 5200, "type": "expense" }))
            .await;
        updated.assert_status_ok();

        let updated = updated.json::<Value>();
        assert_eq!(updated["message"], "Transaction Updated");
        assert_eq!(updated["data"]["title"], "Food");
        assert_eq!(updated["data"]["amount"], 5200);
        assert_eq!(updated["data"]["id"], id);

        // Delete
        let deleted = server.delete(&format!("/transactions/{id}")).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>()["message"], "Transaction Deleted");

        // Gone
        server
            .get(&format!("/transactions/{id}"))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn invalid_create_reports_fields_and_persists_nothing() {
        let server = test_server().await;

        let response = server
            .post("/transactions")
            .json(&json!({ "title": "ab", "amount": 0, "type": "transfer" }))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.json::<Value>();
        assert_eq!(body["title"][0], "The title must be at least 3 characters.");
        assert_eq!(body["amount"][0], "Amount must be a number");
        assert_eq!(body["type"][0], "The selected type is invalid.");

        // Nothing was written
        let listed = server.get("/transactions").await;
        listed.assert_status_ok();
        assert_eq!(listed.json::<Value>()["data"], json!([]));
    }

    #[tokio::test]
    async fn create_with_missing_fields_reports_each_field() {
        let server = test_server().await;

        let response = server.post("/transactions").json(&json!({})).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let body = response.json::<Value>();
        assert_eq!(body["title"][0], "The title field is required.");
        assert_eq!(body["amount"][0], "The amount field is required.");
        assert_eq!(body["type"][0], "The type field is required.");
    }

    #[tokio::test]
    async fn list_returns_most_recent_first() {
        let server = test_server().await;

        server
            .post("/transactions")
            .json(&json!({
                "title": "Earlier",
                "amount": 100,
                "type": "expense",
                "time": "2025-08-01T10:00:00Z"
            }))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/transactions")
            .json(&json!({
                "title": "Later",
                "amount": 200,
                "type": "revenue",
                "time": "2025-08-02T10:00:00Z"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let listed = server.get("/transactions").await;
        listed.assert_status_ok();

        let body = listed.json::<Value>();
        assert_eq!(body["message"], "List transaction order by time");
        assert_eq!(body["data"][0]["title"], "Later");
        assert_eq!(body["data"][1]["title"], "Earlier");
    }

    #[tokio::test]
    async fn create_defaults_time_when_absent() {
        let server = test_server().await;

        let created = server
            .post("/transactions")
            .json(&json!({ "title": "Rent", "amount": 1200, "type": "expense" }))
            .await;
        created.assert_status(StatusCode::CREATED);

        let time = created.json::<Value>()["data"]["time"].clone();
        assert!(time.is_string(), "server should have assigned a time");
    }

    #[tokio::test]
    async fn read_unknown_id_is_not_found() {
        let server = test_server().await;

        let response = server.get("/transactions/999").await;
        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>()["error"]["code"],
            "transaction_not_found"
        );
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_even_with_invalid_body() {
        let server = test_server().await;

        // The missing record wins over the invalid body
        server
            .put("/transactions/999")
            .json(&json!({ "title": "x", "amount": 0, "type": "nope" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn update_with_invalid_body_leaves_record_untouched() {
        let server = test_server().await;

        let created = server
            .post("/transactions")
            .json(&json!({ "title": "Groceries", "amount": 5000, "type": "expense" }))
            .await;
        let id = created.json::<Value>()["data"]["id"]
            .as_i64()
            .expect("id should be an integer");

        server
            .put(&format!("/transactions/{id}"))
            .json(&json!({ "title": "ab", "amount": 5200, "type": "expense" }))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

        let fetched = server.get(&format!("/transactions/{id}")).await;
        assert_eq!(fetched.json::<Value>()["data"]["title"], "Groceries");
    }

    #[tokio::test]
    async fn patch_behaves_like_put() {
        let server = test_server().await;

        let created = server
            .post("/transactions")
            .json(&json!({ "title": "Groceries", "amount": 5000, "type": "expense" }))
            .await;
        let id = created.json::<Value>()["data"]["id"]
            .as_i64()
            .expect("id should be an integer");

        let patched = server
            .patch(&format!("/transactions/{id}"))
            .json(&json!({ "title": "Food", "amount": 5200, "type": "revenue" }))
            .await;
        patched.assert_status_ok();
        assert_eq!(patched.json::<Value>()["data"]["type"], "revenue");
    }

    #[tokio::test]
    async fn operations_after_delete_are_not_found() {
        let server = test_server().await;

        let created = server
            .post("/transactions")
            .json(&json!({ "title": "Temp", "amount": 10, "type": "expense" }))
            .await;
        let id = created.json::<Value>()["data"]["id"]
            .as_i64()
            .expect("id should be an integer");

        server
            .delete(&format!("/transactions/{id}"))
            .await
            .assert_status_ok();

        // Second delete reports not-found rather than failing hard
        server
            .delete(&format!("/transactions/{id}"))
            .await
            .assert_status_not_found();

        server
            .put(&format!("/transactions/{id}"))
            .json(&json!({ "title": "Food", "amount": 5200, "type": "expense" }))
            .await
            .assert_status_not_found();
    }
}
