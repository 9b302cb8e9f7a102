//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating and managing a SQLite connection pool
//! - Running database migrations automatically

use std::str::FromStr;

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

/// Type alias for the SQLite connection pool.
///
/// Instead of writing `Pool<Sqlite>` everywhere, we can use `DbPool`.
pub type DbPool = Pool<Sqlite>;

/// Create a new SQLite connection pool.
///
/// A connection pool maintains database connections that are reused across HTTP requests instead of being opened per request.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (e.g. `sqlite:transactions.db`)
///
/// # Configuration
///
/// - Maximum connections: 5
/// - The database file is created on first use if it does not exist yet,
///   so a fresh checkout starts without manual setup
///
/// # Errors
///
/// Returns an error if:
/// - The connection string is invalid
/// - The database file cannot be created or opened
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        // Limit concurrent connections
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// This function executes all SQL migration files in order. Migrations are tracked in a special `_sqlx_migrations` table, so each migration runs only once.
///
/// # Arguments
///
/// * `pool` - Database connection pool
///
/// # Migration Files
///
/// Migration files must be in `migrations/` directory with format:
/// - `<timestamp>_<name>.sql` (e.g., `20250807000001_create_transactions.sql`)
///
/// # Errors
///
/// Returns an error if:
/// - Migration files cannot be read
/// - SQL syntax errors in migration files
/// - Database errors during migration execution
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // The macro reads migrations at compile time from ./migrations directory
    sqlx::migrate!("./migrations").run(pool).await
}
