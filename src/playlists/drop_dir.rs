//! Per-playlist drop directories on the host filesystem.

use crate::error::{PlaylistError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Root directory holding one subdirectory per playlist.
#[derive(Debug, Clone)]
pub struct DropDirectories {
    root: PathBuf,
}

impl DropDirectories {
    /// A relative `root` is anchored at the current directory when built.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = match std::path::absolute(&root) {
            Ok(absolute) => absolute,
            Err(e) => {
                warn!("Keeping playlists root {:?} as given: {}", root, e);
                root
            }
        };
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn playlist_dir(&self, playlist: &str) -> PathBuf {
        self.root.join(playlist)
    }

    /// Path of a dropped song.
    ///
    /// `mount_root` only anchors a root that could not be made absolute.
    pub fn song_path(&self, mount_root: &Path, playlist: &str, song: &str) -> PathBuf {
        mount_root.join(&self.root).join(playlist).join(song)
    }

    /// Names of the regular files dropped into `playlist`, sorted by file name.
    ///
    /// A missing drop directory lists as empty.
    pub fn list_files(&self, playlist: &str) -> Result<Vec<String>> {
        let dir = self.playlist_dir(playlist);
        let mut names = Vec::new();

        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("filesystem loop"));
                    if source.kind() == io::ErrorKind::NotFound {
                        debug!("No drop directory at {:?}", dir);
                        return Ok(names);
                    }
                    return Err(PlaylistError::DropDirectory { path: dir, source });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => warn!("Skipping non UTF-8 file name {:?}", entry.path()),
            }
        }

        Ok(names)
    }

    pub fn create(&self, playlist: &str) -> io::Result<PathBuf> {
        let dir = self.playlist_dir(playlist);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Remove the drop directory of `playlist` if it exists and is empty.
    pub fn remove_empty(&self, playlist: &str) -> io::Result<()> {
        let dir = self.playlist_dir(playlist);
        if !dir.is_dir() {
            return Ok(());
        }
        fs::remove_dir(&dir)
    }
}
