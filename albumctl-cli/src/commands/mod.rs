//! Subcommand implementations

pub mod migrate;
pub mod serve;

use anyhow::{Context, Result};
use albumctl_server::db::{create_pool, migrations, PgPool};
use albumctl_server::DbConfig;

/// Read DB_* config, open the pool, and make sure the schema exists.
///
/// Every failure here is fatal: the process never serves without a working
/// database.
pub(crate) async fn open_database() -> Result<PgPool> {
    let config = DbConfig::from_env().context("Database configuration incomplete")?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        database = %config.dbname,
        "Connecting to database"
    );

    let pool = create_pool(&config)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to create albums table")?;

    Ok(pool)
}
