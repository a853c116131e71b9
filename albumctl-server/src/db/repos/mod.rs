//! Repository implementations for album storage
//!
//! - [`PgAlbumRepo`]: PostgreSQL, used by the server
//! - [`MemoryAlbumStore`]: in-process, used by tests and local runs

pub mod albums;
pub mod memory;

pub use albums::{Album, AlbumStore, DbError, PgAlbumRepo};
pub use memory::MemoryAlbumStore;
