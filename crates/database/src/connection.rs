//! Database connection management.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use staffdesk_config::DatabaseConfig;
use tracing::info;

/// Establish the Postgres connection pool.
pub async fn prepare_database(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("failed to connect to the database")?;

    // Fail fast on a pool that cannot serve queries.
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("failed to verify database connectivity")?;

    info!(max_connections = config.max_connections, "database connection established");
    Ok(pool)
}
