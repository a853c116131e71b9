//! Custom Axum extractors
//!
//! Both wrap axum's built-in extractors so rejections come back as
//! [`ApiError`] JSON bodies instead of plain text.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Album id from the `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct AlbumId(pub i64);

impl<S> FromRequestParts<S> for AlbumId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i64> = Path::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}

/// JSON request body
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
