//! Request payloads for the album resource
//!
//! No validation rules apply to album fields; these types only describe
//! which fields a request carries.

pub mod album;

pub use album::{AlbumPatch, NewAlbum};
