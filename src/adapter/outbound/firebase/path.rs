//! Firebase key and path rules.

use crate::error::RemoteError;

/// Longest key segment Firebase accepts, in bytes.
const MAX_SEGMENT_BYTES: usize = 768;

/// Characters Firebase forbids inside a key.
const FORBIDDEN: [char; 5] = ['.', '$', '#', '[', ']'];

/// Split `path` into segments, rejecting anything Firebase would refuse.
///
/// Leading and trailing slashes are ignored.
pub(crate) fn segments(path: &str) -> Result<Vec<&str>, RemoteError> {
    let invalid = |reason: &'static str| RemoteError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Err(invalid("path is empty"));
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    for part in &parts {
        if part.is_empty() {
            return Err(invalid("path contains an empty segment"));
        }
        if part.len() > MAX_SEGMENT_BYTES {
            return Err(invalid("path segment longer than 768 bytes"));
        }
        if part.contains(&FORBIDDEN[..]) {
            return Err(invalid("path contains one of . $ # [ ]"));
        }
        if part.chars().any(char::is_control) {
            return Err(invalid("path contains control characters"));
        }
    }
    Ok(parts)
}
