//! Transaction service - Core business logic for the transaction lifecycle.
//!
//! This service handles:
//! - Ordered retrieval of the ledger
//! - Creation with server-side time defaulting
//! - Lookup, in-place update, and permanent deletion by identifier
//! - Database transaction management
//!
//! # Atomicity Guarantees
//!
//! Every write (create, update, delete) happens within a single database
//! transaction. The database ensures all-or-nothing execution.

use chrono::Utc;

use crate::{db::DbPool, error::AppError, models::transaction::{Transaction, ValidTransaction}};

/// List all transactions, most recent first.
///
/// # Ordering
///
/// Ordered by the ledger `time` column descending. Records sharing the same
/// time fall back to store order.
///
/// # Errors
///
/// - `Database` family: store-layer failure
pub async fn list_transactions(pool: &DbPool) -> Result<Vec<Transaction>, AppError> {
    let transactions = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, title, amount, type, time, created_at, updated_at
        FROM transactions
        ORDER BY time DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(transactions)
}

/// Create a new transaction.
///
/// # Process
///
/// 1. Default the ledger time to now when the caller omitted it
/// 2. Start database transaction
/// 3. Insert the record, letting the store assign the identifier
/// 4. Commit (or rollback on error)
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `fields` - Validated title, amount, type, and optional time
///
/// # Returns
///
/// The created transaction record, including its assigned identifier.
///
/// # Errors
///
/// - `Constraint`: the store rejected the write
/// - `Database` family: any other store-layer failure
pub async fn create_transaction(
    pool: &DbPool,
    fields: ValidTransaction,
) -> Result<Transaction, AppError> {
    let now = Utc::now();
    // The ledger time is always assigned server-side when absent
    let time = fields.time.unwrap_or(now);

    // Start db transaction
    let mut tx = pool.begin().await?;

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        INSERT INTO transactions (title, amount, type, time, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, amount, type, time, created_at, updated_at
        "#,
    )
    .bind(&fields.title)
    .bind(fields.amount)
    .bind(fields.transaction_type)
    .bind(time)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    // Commit all changes atomically
    tx.commit().await?;

    Ok(transaction)
}

/// Get a transaction by its identifier.
///
/// Returns `None` when no record has that identifier; callers decide
/// whether that is an error.
pub async fn get_transaction_by_id(
    pool: &DbPool,
    transaction_id: i64,
) -> Result<Option<Transaction>, AppError> {
    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        SELECT id, title, amount, type, time, created_at, updated_at
        FROM transactions
        WHERE id = $1
        "#,
    )
    .bind(transaction_id)
    .fetch_optional(pool)
    .await?;

    Ok(transaction)
}

/// Update a transaction in place.
///
/// Overwrites title, amount, and type, refreshes `updated_at`, and leaves
/// the identifier and ledger time untouched. The payload's `time` field,
/// if any, is ignored here.
///
/// # Errors
///
/// - `TransactionNotFound`: no record has that identifier
/// - `Database` family: store-layer failure
pub async fn update_transaction(
    pool: &DbPool,
    transaction_id: i64,
    fields: ValidTransaction,
) -> Result<Transaction, AppError> {
    // Start database transaction
    let mut tx = pool.begin().await?;

    let transaction = sqlx::query_as::<_, Transaction>(
        r#"
        UPDATE transactions
        SET title = $1, amount = $2, type = $3, updated_at = $4
        WHERE id = $5
        RETURNING id, title, amount, type, time, created_at, updated_at
        "#,
    )
    .bind(&fields.title)
    .bind(fields.amount)
    .bind(fields.transaction_type)
    .bind(Utc::now())
    .bind(transaction_id)
    .fetch_optional(&mut *tx)
    .await?;

    match transaction {
        Some(transaction) => {
            // Commit atomically
            tx.commit().await?;
            Ok(transaction)
        }
        None => {
            tx.rollback().await?;
            Err(AppError::TransactionNotFound)
        }
    }
}

/// Permanently delete a transaction.
///
/// # Errors
///
/// - `TransactionNotFound`: no record has that identifier
/// - `Database` family: store-layer failure
pub async fn delete_transaction(pool: &DbPool, transaction_id: i64) -> Result<(), AppError> {
    // Start database transaction
    let mut tx = pool.begin().await?;

    let deleted_count = sqlx::query("DELETE FROM transactions WHERE id = $1")
        .bind(transaction_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted_count == 0 {
        tx.rollback().await?;
        return Err(AppError::TransactionNotFound);
    }

    tx.commit().await?;

    Ok(())
}
