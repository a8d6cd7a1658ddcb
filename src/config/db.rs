// src/config/db.rs
// DOCUMENTATION: PostgreSQL pool setup
// PURPOSE: Build the connection pool every repository runs on

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

// Idle connections are recycled after 5 minutes, every connection after 30
const IDLE_TIMEOUT_SECS: u64 = 300;
const MAX_LIFETIME_SECS: u64 = 1800;

/// Build the PostgreSQL connection pool
/// DOCUMENTATION: Called once from main.rs before the server binds.
/// DATABASE_URL carries credentials and must stay out of the logs.
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        .idle_timeout(Duration::from_secs(IDLE_TIMEOUT_SECS))
        .max_lifetime(Duration::from_secs(MAX_LIFETIME_SECS))
        .connect(&config.database_url)
        .await?;

    // Round-trip once before the server starts taking traffic
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!(
        "Database pool ready ({} max connections, {}s acquire timeout)",
        config.db_max_connections,
        config.db_connection_timeout
    );
    Ok(pool)
}
