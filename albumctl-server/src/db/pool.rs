//! Database connection pool management

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(config, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    config: &DbConfig,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        host = %config.host,
        port = config.port,
        database = %config.dbname,
        max_connections,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(config.connect_options())
        .await
}
