//! Error types for the inspector property system.
//!
//! Routing misses ("not mine") are not errors — they surface as `None` /
//! `false` from the tree operations. The types here cover the failures
//! that must reach the host: bad preconditions, unparseable cache data,
//! and cache I/O.

use std::fmt;

use saffron_vfs::VfsError;

/// Errors surfaced by the [`Inspector`](crate::Inspector) entry points.
#[derive(Debug)]
pub enum InspectError {
    /// A property path argument was empty.
    EmptyPath,
    /// The root object's type has no [`TypeInfo`](crate::TypeInfo) registration.
    UnregisteredType { type_name: &'static str },
    /// A cached string could not be converted back into a value.
    Convert { path: String, source: ConvertError },
    /// The serialization cache could not be read or written.
    Cache(CacheError),
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "property path must not be empty"),
            Self::UnregisteredType { type_name } => {
                write!(f, "type '{type_name}' is not registered for inspection")
            }
            Self::Convert { path, source } => {
                write!(f, "failed to convert cached value for '{path}': {source}")
            }
            Self::Cache(err) => write!(f, "serialization cache error: {err}"),
        }
    }
}

impl std::error::Error for InspectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Convert { source, .. } => Some(source),
            Self::Cache(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CacheError> for InspectError {
    fn from(err: CacheError) -> Self {
        Self::Cache(err)
    }
}

/// Errors produced when parsing a cache string back into a value.
///
/// These are hard failures: a cache entry that no longer parses is
/// propagated to the caller, never silently defaulted.
#[derive(Debug)]
pub enum ConvertError {
    /// The raw string does not parse as the expected type.
    Malformed { raw: String, expected: &'static str },
    /// The string names no variant of the target enum.
    UnknownEnumVariant {
        value: String,
        allowed: &'static [&'static str],
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { raw, expected } => {
                write!(f, "'{raw}' is not a valid {expected}")
            }
            Self::UnknownEnumVariant { value, allowed } => {
                write!(
                    f,
                    "unknown enum variant '{value}' (expected one of: {})",
                    allowed.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Errors from the on-disk serialization cache.
///
/// Malformed cache *content* is not an error (it degrades to a cache
/// miss); these cover filesystem-level failures and encoding bugs.
#[derive(Debug)]
pub enum CacheError {
    /// The underlying virtual filesystem failed.
    Vfs(VfsError),
    /// The cache map could not be encoded to JSON.
    Encode(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vfs(err) => write!(f, "cache file access failed: {err}"),
            Self::Encode(msg) => write!(f, "cache encode failed: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Vfs(err) => Some(err),
            Self::Encode(_) => None,
        }
    }
}

impl From<VfsError> for CacheError {
    fn from(err: VfsError) -> Self {
        Self::Vfs(err)
    }
}
