//! Playlists exposed as a directory tree.
//!
//! Each playlist is a namespace under `Playlists` in the store plus a drop
//! directory on the host filesystem. A song is either a leaf in the store
//! recording an external location, or a file dropped in the drop directory.

mod drop_dir;
mod library;
mod models;
mod mutator;
mod names;
mod resolver;

pub use drop_dir::DropDirectories;
pub use library::PlaylistLibrary;
pub use models::{DirEntry, EntryKind, SongSource};
pub use names::{check_component, validate_name};
