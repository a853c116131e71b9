//! Database layer - connection pool, schema, and repositories
//!
//! # Design Principles
//!
//! - One pool opened at startup, shared by cloning; no global handle
//! - Handlers see only the [`AlbumStore`] trait
//! - Soft-deleted rows are invisible to every query
//! - Conditional single-statement writes, no load-then-save

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_pool, create_pool_with_options};
pub use sqlx::PgPool;
pub use repos::*;
