use crate::error::{PlaylistError, Result};

/// Check that `name` can be used verbatim as a single path component and key.
///
/// Rejects the host's path separators and NUL, nothing else.
pub fn check_component(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| c == '\0' || std::path::is_separator(c));
    if invalid {
        return Err(PlaylistError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Normalize a user supplied playlist name, returning the form that is stored.
pub fn validate_name(name: &str) -> Result<String> {
    let normalized = name.trim();
    check_component(normalized).map_err(|_| PlaylistError::InvalidName(name.to_string()))?;
    Ok(normalized.to_string())
}
