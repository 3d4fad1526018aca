use super::library::PlaylistLibrary;
use super::models::SongSource;
use super::names::check_component;
use crate::catalog_store::NamespacePath;
use crate::error::{PlaylistError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

impl PlaylistLibrary {
    /// Find where the bytes of `song` in `playlist` live.
    ///
    /// A non-empty location recorded in the store wins and is returned
    /// verbatim. Otherwise the song must be a regular file in the playlist's
    /// drop directory, the same one `list_playlist_songs` reads.
    pub fn resolve_song_source(
        &self,
        playlist: &str,
        song: &str,
        mount_root: &Path,
    ) -> Result<SongSource> {
        check_component(playlist)?;
        check_component(song)?;

        let recorded = self
            .store
            .get_leaf_value(&NamespacePath::song(playlist, song))?;
        if let Some(location) = recorded.filter(|l| !l.is_empty()) {
            debug!("{}/{} resolved to recorded location {}", playlist, song, location);
            return Ok(SongSource::ExternalLocation(PathBuf::from(location)));
        }

        let path = self.drop_dirs.song_path(mount_root, playlist, song);
        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => {
                debug!("{}/{} resolved to dropped file {:?}", playlist, song, path);
                Ok(SongSource::DroppedFile(path))
            }
            Ok(_) => Err(song_not_found(playlist, song)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(song_not_found(playlist, song)),
            Err(source) => Err(PlaylistError::DropDirectory { path, source }),
        }
    }

    /// Concrete path of `song` in `playlist`, see [`Self::resolve_song_source`].
    pub fn resolve_song_path(
        &self,
        playlist: &str,
        song: &str,
        mount_root: &Path,
    ) -> Result<PathBuf> {
        self.resolve_song_source(playlist, song, mount_root)
            .map(SongSource::into_path)
    }
}

fn song_not_found(playlist: &str, song: &str) -> PlaylistError {
    PlaylistError::SongNotFound {
        playlist: playlist.to_string(),
        song: song.to_string(),
    }
}
