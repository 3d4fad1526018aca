//! MuLi playlists library
//!
//! Presents the playlists of a music library as a directory tree, merging
//! the playlist records of the namespace store with files dropped directly
//! into per-playlist directories.

pub mod catalog_store;
pub mod config;
pub mod error;
pub mod playlists;
pub mod sqlite_persistence;

pub use catalog_store::{NamespacePath, SqliteNamespaceStore};
pub use error::{PlaylistError, Result};
pub use playlists::{DirEntry, EntryKind, PlaylistLibrary, SongSource};
