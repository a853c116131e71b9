//! Schema bootstrap command

use anyhow::Result;

/// Create the albums table and exit
pub async fn run_migrate() -> Result<()> {
    let pool = super::open_database().await?;
    pool.close().await;

    tracing::info!("Database schema is up to date");
    Ok(())
}
