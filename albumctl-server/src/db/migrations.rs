//! Schema bootstrap for the albums table

use sqlx::PgPool;

/// Create the albums table and its index if they do not exist.
///
/// Safe to run on every startup.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running album migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id BIGSERIAL PRIMARY KEY,
            title TEXT NOT NULL DEFAULT '',
            author TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            deleted_at TIMESTAMPTZ
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Live rows only; every read filters on deleted_at IS NULL
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_albums_live ON albums(id) WHERE deleted_at IS NULL",
    )
    .execute(pool)
    .await?;

    tracing::info!("Album migrations complete");
    Ok(())
}
