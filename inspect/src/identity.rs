//! Root identity resolution and cache key derivation.
//!
//! A root object's identity partitions the serialization cache: live
//! tree-resident instances are keyed by their tree path, file-backed assets
//! by their file path. Instances not yet attached anywhere are `Detached`
//! and produce no cache key at all, so transient objects never share (or
//! pollute) a cache partition.

/// Where a root object lives, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Not attached to the runtime tree and not file-backed. No caching.
    Detached,
    /// Full structural path of a live instance within the runtime tree.
    TreePath(String),
    /// Backing file path of an asset.
    AssetPath(String),
}

impl Identity {
    /// Stable cache partition key, or `None` for detached instances.
    ///
    /// Deterministic across runs for the same path, so cache files stay
    /// valid between sessions.
    pub fn cache_key(&self) -> Option<CacheKey> {
        match self {
            Identity::Detached => None,
            Identity::TreePath(path) | Identity::AssetPath(path) => {
                Some(CacheKey(fnv1a_64(path.as_bytes())))
            }
        }
    }
}

/// Hash of a root identity path, used as the cache file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(pub u64);

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

// FNV-1a, 64 bit. Stable string hash independent of std's randomized hasher.
fn fnv1a_64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}
