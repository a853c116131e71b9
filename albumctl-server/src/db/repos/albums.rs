//! Album repository
//!
//! Every lookup returns an explicit `Option`/`bool` for existence instead of
//! handing back a default-valued record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::{AlbumPatch, NewAlbum};

/// Album record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Album persistence, injected into the HTTP layer.
#[async_trait]
pub trait AlbumStore: Send + Sync {
    /// Insert a new album; the store assigns `id` and timestamps.
    async fn create(&self, album: NewAlbum) -> Result<Album, DbError>;

    /// All live albums in ascending id order.
    async fn list(&self) -> Result<Vec<Album>, DbError>;

    /// A live album by id.
    async fn get(&self, id: i64) -> Result<Option<Album>, DbError>;

    /// Apply `patch` to a live album, returning the stored result.
    async fn update(&self, id: i64, patch: AlbumPatch) -> Result<Option<Album>, DbError>;

    /// Soft-delete a live album. Returns `false` if there was none.
    async fn delete(&self, id: i64) -> Result<bool, DbError>;

    /// Check that the backing store answers.
    async fn ping(&self) -> Result<(), DbError>;
}

/// PostgreSQL album repository
#[derive(Clone)]
pub struct PgAlbumRepo {
    pool: PgPool,
}

impl PgAlbumRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlbumStore for PgAlbumRepo {
    async fn create(&self, album: NewAlbum) -> Result<Album, DbError> {
        let album: Album = sqlx::query_as(
            r#"
            INSERT INTO albums (title, author)
            VALUES ($1, $2)
            RETURNING id, title, author, created_at, updated_at
            "#,
        )
        .bind(&album.title)
        .bind(&album.author)
        .fetch_one(&self.pool)
        .await?;

        Ok(album)
    }

    async fn list(&self) -> Result<Vec<Album>, DbError> {
        let albums: Vec<Album> = sqlx::query_as(
            r#"
            SELECT id, title, author, created_at, updated_at
            FROM albums
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(albums)
    }

    async fn get(&self, id: i64) -> Result<Option<Album>, DbError> {
        let album: Option<Album> = sqlx::query_as(
            r#"
            SELECT id, title, author, created_at, updated_at
            FROM albums
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(album)
    }

    /// Single statement: a concurrent delete can no longer slip in
    /// between the load and the save.
    async fn update(&self, id: i64, patch: AlbumPatch) -> Result<Option<Album>, DbError> {
        let album: Option<Album> = sqlx::query_as(
            r#"
            UPDATE albums
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, title, author, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.author)
        .fetch_optional(&self.pool)
        .await?;

        Ok(album)
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query(
            "UPDATE albums SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
