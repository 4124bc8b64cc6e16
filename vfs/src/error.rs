use std::fmt;
use std::io;

/// Failure of a virtual filesystem operation.
///
/// `NotFound` is the only variant callers routinely branch on: the
/// serialization cache treats it as "no cache yet" and creates the file.
/// Everything else surfaces to the host as-is.
#[derive(Debug)]
pub enum VfsError {
    /// No file at this path within the resolved provider.
    NotFound(String),
    /// The first path segment names no mounted source, and no default
    /// source is configured to absorb it.
    UnknownSource(String),
    /// The path failed normalization.
    InvalidPath { path: String, reason: &'static str },
    /// A write-family operation reached a provider without write support.
    /// Carries the offending path.
    ReadOnly(String),
    /// The provider's backing storage failed.
    Io(io::Error),
}

impl fmt::Display for VfsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsError::NotFound(path) => write!(f, "no such file: '{path}'"),
            VfsError::UnknownSource(name) => write!(f, "'{name}' is not a mounted source"),
            VfsError::InvalidPath { path, reason } => {
                write!(f, "cannot use path '{path}': {reason}")
            }
            VfsError::ReadOnly(path) => write!(f, "'{path}' is on a read-only source"),
            VfsError::Io(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for VfsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VfsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VfsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => VfsError::NotFound(err.to_string()),
            _ => VfsError::Io(err),
        }
    }
}
