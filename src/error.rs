//! Error taxonomy shared by the store adapter and the playlist layer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("Invalid name {0:?}")]
    InvalidName(String),

    #[error("Invalid song location {0:?}")]
    InvalidLocation(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] rusqlite::Error),

    #[error("Store schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Type conflict at {path}")]
    TypeConflict { path: String },

    #[error("Namespace not found: {path}")]
    NamespaceNotFound { path: String },

    #[error("Playlist already exists: {0}")]
    PlaylistAlreadyExists(String),

    #[error("Playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("Song {song} not found in playlist {playlist}")]
    SongNotFound { playlist: String, song: String },

    #[error("Drop directory error at {path:?}: {source}")]
    DropDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Playlist {playlist} was rolled back, drop directory creation failed: {source}")]
    PartialFailure {
        playlist: String,
        #[source]
        source: io::Error,
    },

    #[error(
        "Playlist {playlist} is inconsistent: drop directory creation failed ({directory_error}) \
         and the namespace could not be removed ({rollback_error})"
    )]
    RollbackFailed {
        playlist: String,
        directory_error: io::Error,
        rollback_error: Box<PlaylistError>,
    },
}

pub type Result<T> = std::result::Result<T, PlaylistError>;
