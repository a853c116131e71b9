//! albumctl-server: HTTP CRUD service for albums
//!
//! Layers, leaves first:
//! - [`config`]: database connection parameters from the environment
//! - [`db`]: connection pool, schema bootstrap, and the [`db::AlbumStore`] seam
//! - [`models`]: request payloads (new album, partial update)
//! - [`http`]: axum router, handlers, and JSON error mapping

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DbConfig};
pub use db::{AlbumStore, DbError, MemoryAlbumStore, PgAlbumRepo};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
