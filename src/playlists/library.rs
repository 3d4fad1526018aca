use super::drop_dir::DropDirectories;
use super::models::DirEntry;
use super::names::check_component;
use crate::catalog_store::{NamespacePath, SqliteNamespaceStore};
use crate::error::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Playlist view over the namespace store and the drop directories.
///
/// Holds no cached state, every call runs in its own store transaction.
#[derive(Clone)]
pub struct PlaylistLibrary {
    pub(super) store: Arc<SqliteNamespaceStore>,
    pub(super) drop_dirs: DropDirectories,
}

impl PlaylistLibrary {
    pub fn new(store: Arc<SqliteNamespaceStore>, playlists_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            drop_dirs: DropDirectories::new(playlists_root),
        }
    }

    pub fn store(&self) -> &SqliteNamespaceStore {
        &self.store
    }

    pub fn drop_dirs(&self) -> &DropDirectories {
        &self.drop_dirs
    }

    /// All playlists, as directories in key order.
    ///
    /// Stray leaves directly under `Playlists` are skipped.
    pub fn list_playlists(&self) -> Result<Vec<DirEntry>> {
        let Some(children) = self.store.list_children(&NamespacePath::playlists())? else {
            debug!("No playlists namespace yet");
            return Ok(Vec::new());
        };

        let playlists = children
            .into_iter()
            .filter_map(|child| {
                if !child.is_namespace() {
                    warn!("Skipping leaf {:?} at the playlists level", child.key);
                    None
                } else if check_component(&child.key).is_err() {
                    warn!("Skipping playlist with unusable name {:?}", child.key);
                    None
                } else {
                    Some(DirEntry::directory(child.key))
                }
            })
            .collect::<Vec<_>>();

        debug!("Listed {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Songs of `playlist`: registered songs in key order, then dropped files
    /// not registered in the store, each name once.
    ///
    /// An unknown playlist lists as empty.
    pub fn list_playlist_songs(&self, playlist: &str) -> Result<Vec<DirEntry>> {
        check_component(playlist)?;

        let Some(children) = self
            .store
            .list_children(&NamespacePath::playlist(playlist))?
        else {
            debug!("Playlist {} has no namespace", playlist);
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        let mut songs = Vec::new();
        for child in children {
            if check_component(&child.key).is_err() {
                warn!(
                    "Skipping unusable song name {:?} in playlist {}",
                    child.key, playlist
                );
                continue;
            }
            match child.value {
                Some(location) if !location.is_empty() => {
                    seen.insert(child.key.clone());
                    songs.push(DirEntry::file(child.key));
                }
                // Empty locations resolve through the drop directory
                Some(_) => {}
                None => warn!(
                    "Skipping nested namespace {:?} in playlist {}",
                    child.key, playlist
                ),
            }
        }

        for name in self.drop_dirs.list_files(playlist)? {
            if check_component(&name).is_err() {
                warn!("Skipping unusable drop file name {:?} in {}", name, playlist);
                continue;
            }
            if seen.insert(name.clone()) {
                songs.push(DirEntry::file(name));
            }
        }

        debug!("Listed {} songs in playlist {}", songs.len(), playlist);
        Ok(songs)
    }
}
