use super::library::PlaylistLibrary;
use super::names::{check_component, validate_name};
use crate::catalog_store::NamespacePath;
use crate::error::{PlaylistError, Result};
use std::io;
use tracing::{error, info, warn};

impl PlaylistLibrary {
    /// Create a playlist namespace and its drop directory.
    ///
    /// The namespace is committed first. If the drop directory cannot be
    /// created afterwards the namespace is removed again and
    /// `PartialFailure` is returned. Returns the normalized name.
    pub fn create_playlist(&self, name: &str) -> Result<String> {
        let name = validate_name(name)?;
        let path = NamespacePath::playlist(&name);

        self.store.update(|tx| {
            if tx.namespace_exists(&path)? {
                return Err(PlaylistError::PlaylistAlreadyExists(name.clone()));
            }
            tx.create_namespace(&path)?;
            Ok(())
        })?;
        info!("Created playlist namespace {}", path);

        match self.drop_dirs.create(&name) {
            Ok(dir) => {
                info!("Created drop directory {:?} for playlist {}", dir, name);
                Ok(name)
            }
            Err(directory_error) => Err(self.roll_back_playlist(name, directory_error)),
        }
    }

    fn roll_back_playlist(&self, name: String, directory_error: io::Error) -> PlaylistError {
        warn!(
            "Failed to create drop directory for playlist {}: {}, rolling back",
            name, directory_error
        );

        if let Err(e) = self.drop_dirs.remove_empty(&name) {
            warn!("Could not clean up drop directory of {}: {}", name, e);
        }

        match self.store.remove(&NamespacePath::playlist(&name)) {
            Ok(_) => PlaylistError::PartialFailure {
                playlist: name,
                source: directory_error,
            },
            Err(rollback_error) => {
                error!(
                    "Playlist {} left without drop directory, namespace removal failed: {}",
                    name, rollback_error
                );
                PlaylistError::RollbackFailed {
                    playlist: name,
                    directory_error,
                    rollback_error: Box::new(rollback_error),
                }
            }
        }
    }

    /// Register `song` in `playlist` with an external `location`.
    ///
    /// Overwrites a previous location of the same song.
    pub fn add_song(&self, playlist: &str, song: &str, location: &str) -> Result<()> {
        check_component(playlist)?;
        check_component(song)?;
        if location.trim().is_empty() {
            return Err(PlaylistError::InvalidLocation(location.to_string()));
        }

        let playlist_path = NamespacePath::playlist(playlist);
        self.store.update(|tx| {
            if !tx.namespace_exists(&playlist_path)? {
                return Err(PlaylistError::PlaylistNotFound(playlist.to_string()));
            }
            tx.set_leaf_value(&playlist_path.child(song), location)
        })?;
        info!("Registered {}/{} at {}", playlist, song, location);
        Ok(())
    }
}
