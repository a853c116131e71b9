//! Album payloads - create and partial update

use serde::{Deserialize, Deserializer};

use crate::db::Album;

/// Body of `POST /albums`.
///
/// Missing or `null` fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewAlbum {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `PUT /albums/{id}`.
///
/// Only fields present (and non-null) in the request are written; the rest
/// keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlbumPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl AlbumPatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }

    /// Overwrite the fields this patch carries.
    pub fn apply(&self, album: &mut Album) {
        if let Some(title) = &self.title {
            album.title = title.clone();
        }
        if let Some(author) = &self.author {
            album.author = author.clone();
        }
    }
}
