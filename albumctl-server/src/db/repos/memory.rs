//! In-memory album store
//!
//! Same observable behaviour as [`PgAlbumRepo`](super::PgAlbumRepo):
//! sequential ids starting at 1, soft delete, ascending-id listing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::albums::{Album, AlbumStore, DbError};
use crate::models::{AlbumPatch, NewAlbum};

struct Row {
    album: Album,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

impl Inner {
    fn live_mut(&mut self, id: i64) -> Option<&mut Row> {
        self.rows.get_mut(&id).filter(|row| row.deleted_at.is_none())
    }
}

/// Album store backed by a mutex-guarded map
#[derive(Default)]
pub struct MemoryAlbumStore {
    inner: Mutex<Inner>,
}

impl MemoryAlbumStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlbumStore for MemoryAlbumStore {
    async fn create(&self, album: NewAlbum) -> Result<Album, DbError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();

        let album = Album {
            id,
            title: album.title,
            author: album.author,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(
            id,
            Row {
                album: album.clone(),
                deleted_at: None,
            },
        );

        Ok(album)
    }

    async fn list(&self) -> Result<Vec<Album>, DbError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .values()
            .filter(|row| row.deleted_at.is_none())
            .map(|row| row.album.clone())
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Album>, DbError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .rows
            .get(&id)
            .filter(|row| row.deleted_at.is_none())
            .map(|row| row.album.clone()))
    }

    async fn update(&self, id: i64, patch: AlbumPatch) -> Result<Option<Album>, DbError> {
        let mut inner = self.inner.lock().await;
        let Some(row) = inner.live_mut(id) else {
            return Ok(None);
        };

        patch.apply(&mut row.album);
        row.album.updated_at = Utc::now();
        Ok(Some(row.album.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, DbError> {
        let mut inner = self.inner.lock().await;
        match inner.live_mut(id) {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_album(title: &str, author: &str) -> NewAlbum {
        NewAlbum {
            title: title.into(),
            author: author.into(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_never_reused() {
        let store = MemoryAlbumStore::new();
        let first = store.create(new_album("A", "B")).await.unwrap();
        let second = store.create(new_album("C", "D")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        assert!(store.delete(second.id).await.unwrap());
        let third = store.create(new_album("E", "F")).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn list_skips_deleted_rows() {
        let store = MemoryAlbumStore::new();
        for i in 0..3 {
            store
                .create(new_album(&format!("t{i}"), "a"))
                .await
                .unwrap();
        }
        store.delete(2).await.unwrap();

        let ids: Vec<i64> = store.list().await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn update_deleted_row_is_none() {
        let store = MemoryAlbumStore::new();
        let album = store.create(new_album("A", "B")).await.unwrap();
        store.delete(album.id).await.unwrap();

        let patch = AlbumPatch {
            title: Some("C".into()),
            author: None,
        };
        assert!(store.update(album.id, patch).await.unwrap().is_none());
        assert!(!store.delete(album.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_bumps_updated_at_only() {
        let store = MemoryAlbumStore::new();
        let album = store.create(new_album("A", "B")).await.unwrap();

        let updated = store
            .update(album.id, AlbumPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.created_at, album.created_at);
        assert!(updated.updated_at >= album.updated_at);
        assert_eq!(updated.title, "A");
    }
}
