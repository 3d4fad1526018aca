use std::fmt;

/// Top-level namespace holding one sub-namespace per playlist.
pub const PLAYLISTS_NAMESPACE: &str = "Playlists";

/// Hierarchical key path, e.g. `Playlists/rock/track1.mp3`.
///
/// The empty path addresses the root namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn playlists() -> Self {
        Self::new([PLAYLISTS_NAMESPACE])
    }

    pub fn playlist(name: &str) -> Self {
        Self::new([PLAYLISTS_NAMESPACE, name])
    }

    pub fn song(playlist: &str, song: &str) -> Self {
        Self::new([PLAYLISTS_NAMESPACE, playlist, song])
    }

    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Splits off the last key. `None` for the root.
    pub fn split_last(&self) -> Option<(NamespacePath, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            NamespacePath {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    pub(crate) fn prefix(&self, len: usize) -> NamespacePath {
        NamespacePath {
            segments: self.segments[..len].to_vec(),
        }
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        write!(f, "{}", self.segments.join("/"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Directory-like node holding further keys.
    Namespace,
    /// Terminal key holding a value.
    Leaf,
}

/// Immediate child of a namespace, as returned by ordered iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildEntry {
    pub key: String,
    pub kind: NodeKind,
    /// Stored value, always `None` for namespaces.
    pub value: Option<String>,
}

impl ChildEntry {
    pub fn is_namespace(&self) -> bool {
        self.kind == NodeKind::Namespace
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }
}
