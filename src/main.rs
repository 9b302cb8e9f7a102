//! Transaction API - Main Application Entry Point
//!
//! This is a REST API server for recording financial transactions (title, amount, type, time) backed by a relational table. It exposes the full lifecycle of a transaction record behind five operations: list, create, read, update, delete.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: SQLite with sqlx (async queries)
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod services;

use tracing_subscriber::EnvFilter;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let app = Router::new()
        // Health check route
        .route("/health", get(handlers::health::health_check))
        // Transaction collection routes
        .route(
            "/transactions",
            get(handlers::transactions::list_transactions),
        )
        .route(
            "/transactions",
            post(handlers::transactions::create_transaction),
        )
        // Single-transaction routes; PUT and PATCH share the update handler
        .route(
            "/transactions/{id}",
            get(handlers::transactions::get_transaction),
        )
        .route(
            "/transactions/{id}",
            put(handlers::transactions::update_transaction)
                .patch(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        )
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Browser clients are allowed from any origin
        .layer(CorsLayer::permissive())
        // Share database pool with all handlers via State extraction
        .with_state(pool);

    // Bind to network address and start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
