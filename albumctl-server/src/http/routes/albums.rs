//! Album endpoints
//!
//! | Method | Path           | Success                         |
//! |--------|----------------|---------------------------------|
//! | POST   | /albums        | 201 + created album             |
//! | GET    | /albums        | 200 + array of albums           |
//! | GET    | /albums/{id}   | 200 + album                     |
//! | PUT    | /albums/{id}   | 200 + updated album             |
//! | DELETE | /albums/{id}   | 200 + confirmation string       |
//!
//! Unknown or soft-deleted ids answer 404; other methods on these paths
//! answer 405. Every body, errors included, is JSON.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::db::Album;
use crate::http::error::ApiError;
use crate::http::extractors::{AlbumId, JsonBody};
use crate::http::server::AppState;
use crate::models::{AlbumPatch, NewAlbum};

pub const DELETED_MESSAGE: &str = "album deleted successfully";

/// Album response
#[derive(Debug, Serialize)]
pub struct AlbumResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Album> for AlbumResponse {
    fn from(a: Album) -> Self {
        Self {
            id: a.id,
            title: a.title,
            author: a.author,
            created_at: a.created_at.to_rfc3339(),
            updated_at: a.updated_at.to_rfc3339(),
        }
    }
}

/// POST /albums - create an album
async fn create_album(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<NewAlbum>,
) -> Result<(StatusCode, Json<AlbumResponse>), ApiError> {
    let album = state.albums.create(req).await?;
    tracing::info!(id = album.id, "album created");

    Ok((StatusCode::CREATED, Json(AlbumResponse::from(album))))
}

/// GET /albums - list all live albums
async fn list_albums(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AlbumResponse>>, ApiError> {
    let albums = state.albums.list().await?;

    Ok(Json(albums.into_iter().map(AlbumResponse::from).collect()))
}

/// GET /albums/{id} - get a single album
async fn get_album(
    State(state): State<Arc<AppState>>,
    AlbumId(id): AlbumId,
) -> Result<Json<AlbumResponse>, ApiError> {
    let album = state
        .albums
        .get(id)
        .await?
        .ok_or_else(|| ApiError::album_not_found(id))?;

    Ok(Json(AlbumResponse::from(album)))
}

/// PUT /albums/{id} - update the fields present in the body
///
/// A body with no fields writes nothing and returns the stored album.
async fn update_album(
    State(state): State<Arc<AppState>>,
    AlbumId(id): AlbumId,
    JsonBody(patch): JsonBody<AlbumPatch>,
) -> Result<Json<AlbumResponse>, ApiError> {
    let album = if patch.is_empty() {
        state.albums.get(id).await?
    } else {
        state.albums.update(id, patch).await?
    }
    .ok_or_else(|| ApiError::album_not_found(id))?;
    tracing::info!(id, "album updated");

    Ok(Json(AlbumResponse::from(album)))
}

/// DELETE /albums/{id} - soft-delete an album
async fn delete_album(
    State(state): State<Arc<AppState>>,
    AlbumId(id): AlbumId,
) -> Result<Json<&'static str>, ApiError> {
    if !state.albums.delete(id).await? {
        return Err(ApiError::album_not_found(id));
    }
    tracing::info!(id, "album deleted");

    Ok(Json(DELETED_MESSAGE))
}

/// Album routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/albums",
            get(list_albums)
                .post(create_album)
                .fallback(super::method_not_allowed),
        )
        .route(
            "/albums/{id}",
            get(get_album)
                .put(update_album)
                .delete(delete_album)
                .fallback(super::method_not_allowed),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryAlbumStore;
    use crate::http::server::{build_router, ServerConfig};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, Response};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryAlbumStore::new()));
        build_router(state, &ServerConfig::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        app.clone().oneshot(request).await.unwrap()
    }

    fn assert_json(response: &Response<Body>) {
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, title: &str, author: &str) -> Value {
        let response = send(
            app,
            Method::POST,
            "/api/v1/albums",
            Some(json!({ "title": title, "author": author })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_json(&response);
        body_json(response).await
    }

    #[tokio::test]
    async fn create_assigns_id() {
        let app = app();
        let album = create(&app, "A", "B").await;

        assert!(album["id"].as_i64().unwrap() > 0);
        assert_eq!(album["title"], "A");
        assert_eq!(album["author"], "B");
        assert!(album["created_at"].is_string());
        assert!(album["updated_at"].is_string());
    }

    #[tokio::test]
    async fn create_with_missing_fields_uses_empty_strings() {
        let app = app();
        let response = send(&app, Method::POST, "/api/v1/albums", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let album = body_json(response).await;
        assert_eq!(album["title"], "");
        assert_eq!(album["author"], "");
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/albums")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad_request");

        // Nothing was stored
        let list = body_json(send(&app, Method::GET, "/api/v1/albums", None).await).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn create_rejects_missing_content_type() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/albums")
            .body(Body::from(r#"{"title":"A","author":"B"}"#))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_returns_every_created_album() {
        let app = app();
        let created = vec![
            create(&app, "Blue Train", "John Coltrane").await,
            create(&app, "Kind of Blue", "Miles Davis").await,
            create(&app, "Mingus Ah Um", "Charles Mingus").await,
        ];

        let response = send(&app, Method::GET, "/api/v1/albums", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json(&response);

        let list = body_json(response).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), created.len());
        for album in &created {
            assert!(list.contains(album), "missing {album}");
        }
    }

    #[tokio::test]
    async fn get_returns_created_album() {
        let app = app();
        let album = create(&app, "A", "B").await;
        let id = album["id"].as_i64().unwrap();

        let response = send(&app, Method::GET, &format!("/api/v1/albums/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json(&response);
        assert_eq!(body_json(response).await, album);
    }

    #[tokio::test]
    async fn get_unknown_id_is_404() {
        let app = app();
        let response = send(&app, Method::GET, "/api/v1/albums/999999", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_json(&response);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert!(body.get("id").is_none());
    }

    #[tokio::test]
    async fn non_integer_id_is_400() {
        let app = app();
        let response = send(&app, Method::GET, "/api/v1/albums/abc", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "bad_request");
    }

    #[tokio::test]
    async fn update_merges_present_fields() {
        let app = app();
        let album = create(&app, "A", "B").await;
        let id = album["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::PUT,
            &format!("/api/v1/albums/{id}"),
            Some(json!({ "title": "C" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json(&response);

        let updated = body_json(response).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["title"], "C");
        assert_eq!(updated["author"], "B");

        let fetched =
            body_json(send(&app, Method::GET, &format!("/api/v1/albums/{id}"), None).await).await;
        assert_eq!(fetched["title"], "C");
        assert_eq!(fetched["author"], "B");
    }

    #[tokio::test]
    async fn update_ignores_id_in_body() {
        let app = app();
        let album = create(&app, "A", "B").await;
        let id = album["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::PUT,
            &format!("/api/v1/albums/{id}"),
            Some(json!({ "id": 12345, "author": "D" })),
        )
        .await;
        let updated = body_json(response).await;
        assert_eq!(updated["id"], id);
        assert_eq!(updated["author"], "D");
    }

    #[tokio::test]
    async fn update_unknown_id_is_404() {
        let app = app();
        let response = send(
            &app,
            Method::PUT,
            "/api/v1/albums/42",
            Some(json!({ "title": "C" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_hides_album() {
        let app = app();
        let keep = create(&app, "keep", "me").await;
        let gone = create(&app, "drop", "me").await;
        let id = gone["id"].as_i64().unwrap();

        let response = send(&app, Method::DELETE, &format!("/api/v1/albums/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json(&response);
        assert_eq!(body_json(response).await, json!(DELETED_MESSAGE));

        let response = send(&app, Method::GET, &format!("/api/v1/albums/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let list = body_json(send(&app, Method::GET, "/api/v1/albums", None).await).await;
        assert_eq!(list, json!([keep]));
    }

    #[tokio::test]
    async fn delete_twice_is_404() {
        let app = app();
        let album = create(&app, "A", "B").await;
        let uri = format!("/api/v1/albums/{}", album["id"]);

        let first = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(second.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(second).await["error"], "not_found");
    }

    #[tokio::test]
    async fn create_treats_null_fields_as_empty() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/v1/albums",
            Some(json!({ "title": null, "author": "B" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let album = body_json(response).await;
        assert_eq!(album["title"], "");
        assert_eq!(album["author"], "B");
    }

    #[tokio::test]
    async fn empty_update_leaves_album_untouched() {
        let app = app();
        let album = create(&app, "A", "B").await;
        let id = album["id"].as_i64().unwrap();

        let response = send(
            &app,
            Method::PUT,
            &format!("/api/v1/albums/{id}"),
            Some(json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, album);

        let response = send(&app, Method::PUT, "/api/v1/albums/777", Some(json!({}))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_method_is_json_405() {
        let app = app();
        for (method, uri) in [
            (Method::PATCH, "/api/v1/albums/1"),
            (Method::DELETE, "/api/v1/albums"),
            (Method::POST, "/health"),
        ] {
            let response = send(&app, method.clone(), uri, None).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
            assert_json(&response);

            let body = body_json(response).await;
            assert_eq!(body["error"], "method_not_allowed");
            assert_eq!(body["message"], format!("{method} is not allowed on {uri}"));
        }
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let app = app();
        let response = send(&app, Method::GET, "/api/v2/albums", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_json(&response);

        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "route '/api/v2/albums' not found");
    }

    async fn preflight(app: &Router, origin: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/v1/albums")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn cors_allows_localhost_by_default() {
        let app = app();
        let response = preflight(&app, "http://localhost:5000").await;
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5000"
        );
    }

    #[tokio::test]
    async fn cors_rejects_foreign_origin_by_default() {
        let app = app();
        let response = preflight(&app, "http://evil.example").await;
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn cors_permissive_allows_any_origin() {
        let state = AppState::new(Arc::new(MemoryAlbumStore::new()));
        let config = ServerConfig {
            cors_permissive: true,
            ..ServerConfig::default()
        };
        let app = build_router(state, &config);

        let response = preflight(&app, "http://evil.example").await;
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn health_is_mounted_at_root() {
        let app = app();
        let response = send(&app, Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_json(&response);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
    }
}
