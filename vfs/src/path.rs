use crate::VfsError;

/// Bring a raw path into canonical form: forward slashes only, no empty
/// or `.` segments, no leading/trailing separator.
///
/// `..` segments are refused outright — a provider's root is a hard
/// boundary, and the cache layer builds paths from hashed keys that must
/// never escape their folder. An empty result (nothing but separators) is
/// also an error, since every VFS path must name at least a source or a
/// file.
pub fn normalize(path: &str) -> Result<String, VfsError> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(VfsError::InvalidPath {
                    path: path.to_owned(),
                    reason: "parent traversal is not allowed",
                });
            }
            other => segments.push(other),
        }
    }
    if segments.is_empty() {
        return Err(VfsError::InvalidPath {
            path: path.to_owned(),
            reason: "no path segments",
        });
    }
    Ok(segments.join("/"))
}

/// Split a normalized path into its source segment and the provider-local
/// remainder. A single-segment path has an empty remainder.
pub(crate) fn split_source(path: &str) -> (&str, &str) {
    match path.split_once('/') {
        Some((source, rest)) => (source, rest),
        None => (path, ""),
    }
}
