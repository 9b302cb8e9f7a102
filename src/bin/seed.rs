//! Database seed binary.
//!
//! Inserts a single fixture transaction so a fresh database has a row to
//! list during development. Reads the same `DATABASE_URL` as the server and
//! runs migrations first, so it works against an empty file.
//!
//! Run with `cargo run --bin seed`.

use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Same environment contract as the server
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:transactions.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    // The schema must exist before inserting fixtures
    sqlx::migrate!("./migrations").run(&pool).await?;

    let now = Utc::now();
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO transactions (title, amount, type, time, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind("Test1")
    .bind(10_000_i64)
    .bind("expense")
    .bind(now)
    .bind(now)
    .bind(now)
    .fetch_one(&pool)
    .await?;

    tracing::info!("Seeded transaction {}", id);

    Ok(())
}
