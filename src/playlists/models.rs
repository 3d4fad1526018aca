use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// Generic directory entry handed to the filesystem adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }
}

/// Where the bytes of a playlist song live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongSource {
    /// Location recorded in the store, returned verbatim.
    ExternalLocation(PathBuf),
    /// File placed directly in the playlist's drop directory.
    DroppedFile(PathBuf),
}

impl SongSource {
    pub fn path(&self) -> &Path {
        match self {
            SongSource::ExternalLocation(path) | SongSource::DroppedFile(path) => path,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            SongSource::ExternalLocation(path) | SongSource::DroppedFile(path) => path,
        }
    }
}
