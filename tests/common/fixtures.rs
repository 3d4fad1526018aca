//! Test fixtures: a playlist library backed by a temporary store and drop root.

// Each test binary uses a different subset
#![allow(dead_code)]

use muli_playlists::{DirEntry, PlaylistLibrary, SqliteNamespaceStore};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const ROCK_PLAYLIST: &str = "rock";
pub const TRACK_1: &str = "track1.mp3";
pub const TRACK_1_LOCATION: &str = "/library/rock/track1.mp3";
pub const TRACK_2: &str = "track2.mp3";

/// Test audio bytes, content is never inspected
pub const TEST_AUDIO_BYTES: &[u8] = b"ID3\x03\x00\x00\x00\x00\x00\x00";

pub struct TestLibrary {
    pub library: PlaylistLibrary,
    pub db_path: PathBuf,
    pub playlists_root: PathBuf,
    _dir: TempDir,
}

impl TestLibrary {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("muli.db");
        let playlists_root = dir.path().join("playlists");
        let store = SqliteNamespaceStore::open(&db_path, 4).unwrap();
        let library = PlaylistLibrary::new(Arc::new(store), &playlists_root);
        Self {
            library,
            db_path,
            playlists_root,
            _dir: dir,
        }
    }

    /// The `rock` scenario: `track1.mp3` registered at an external location,
    /// `track2.mp3` dropped into the drop directory.
    pub fn with_rock_playlist() -> Self {
        let env = Self::new();
        env.library.create_playlist(ROCK_PLAYLIST).unwrap();
        env.library
            .add_song(ROCK_PLAYLIST, TRACK_1, TRACK_1_LOCATION)
            .unwrap();
        env.drop_file(ROCK_PLAYLIST, TRACK_2);
        env
    }

    pub fn mount_root(&self) -> &Path {
        Path::new("/")
    }

    pub fn drop_file(&self, playlist: &str, song: &str) -> PathBuf {
        let dir = self.playlists_root.join(playlist);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(song);
        fs::write(&path, TEST_AUDIO_BYTES).unwrap();
        path
    }

    /// Open a second, independent store on the same database file.
    pub fn reopen(&self) -> PlaylistLibrary {
        let store = SqliteNamespaceStore::open(&self.db_path, 2).unwrap();
        PlaylistLibrary::new(Arc::new(store), &self.playlists_root)
    }
}

pub fn names(entries: &[DirEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}
