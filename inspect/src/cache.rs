//! On-disk serialization cache, partitioned by root identity.
//!
//! One JSON file per cache key, holding a flat string-to-string map from
//! property path to cache string. Every access is a read-modify-write of the
//! whole file; there is no schema version and no pruning — stale files for
//! deleted objects accumulate until the containing folder is cleared by the
//! embedder.

use std::collections::BTreeMap;

use saffron_vfs::{Vfs, VfsError};

use crate::error::CacheError;
use crate::identity::CacheKey;

const DEFAULT_FOLDER: &str = "user/inspect_cache";

pub struct SerializationCache {
    vfs: Vfs,
    folder: String,
}

impl SerializationCache {
    /// Cache rooted at the default folder (`user/inspect_cache`).
    pub fn new(vfs: Vfs) -> Self {
        Self::with_folder(vfs, DEFAULT_FOLDER)
    }

    pub fn with_folder(vfs: Vfs, folder: impl Into<String>) -> Self {
        Self {
            vfs,
            folder: folder.into(),
        }
    }

    fn file_path(&self, key: CacheKey) -> String {
        format!("{}/{key}.json", self.folder)
    }

    /// Look up one entry. Creates an empty cache file as a side effect if
    /// none exists yet for this key.
    pub fn get(&self, key: CacheKey, path: &str) -> Result<Option<String>, CacheError> {
        Ok(self.load_map(key)?.remove(path))
    }

    /// Insert or overwrite one entry (read-modify-write of the whole file).
    pub fn set(&self, key: CacheKey, path: &str, value: &str) -> Result<(), CacheError> {
        let mut map = self.load_map(key)?;
        map.insert(path.to_owned(), value.to_owned());
        self.store_map(key, &map)
    }

    /// The whole map for a key, used for bulk restoration.
    pub fn load(&self, key: CacheKey) -> Result<BTreeMap<String, String>, CacheError> {
        self.load_map(key)
    }

    fn load_map(&self, key: CacheKey) -> Result<BTreeMap<String, String>, CacheError> {
        let file = self.file_path(key);
        let bytes = match self.vfs.read(&file) {
            Ok(bytes) => bytes,
            Err(VfsError::NotFound(_)) => {
                self.vfs.write(&file, b"{}".to_vec())?;
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(err.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(map) => Ok(map),
            Err(err) => {
                log::warn!("malformed cache file '{file}', treating as empty: {err}");
                Ok(BTreeMap::new())
            }
        }
    }

    fn store_map(&self, key: CacheKey, map: &BTreeMap<String, String>) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(map).map_err(|err| CacheError::Encode(err.to_string()))?;
        log::debug!("writing cache file for key {key} ({} entries)", map.len());
        self.vfs.write(&self.file_path(key), bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saffron_vfs::{MemoryProvider, VfsProvider};

    fn cache_over(provider: MemoryProvider) -> SerializationCache {
        let mut vfs = Vfs::new();
        vfs.mount("user", provider);
        SerializationCache::new(vfs)
    }

    #[test]
    fn set_then_get() {
        let cache = cache_over(MemoryProvider::new());
        let key = CacheKey(1);

        cache.set(key, "Score", "42").unwrap();
        assert_eq!(cache.get(key, "Score").unwrap(), Some("42".into()));
        assert_eq!(cache.get(key, "Other").unwrap(), None);
    }

    #[test]
    fn partitions_are_isolated() {
        let cache = cache_over(MemoryProvider::new());

        cache.set(CacheKey(1), "Score", "42").unwrap();
        assert_eq!(cache.get(CacheKey(2), "Score").unwrap(), None);
    }

    #[test]
    fn get_creates_empty_file() {
        let provider = MemoryProvider::new();
        let cache = cache_over(provider.clone());
        let key = CacheKey(0xab);

        assert_eq!(cache.get(key, "anything").unwrap(), None);

        let mut vfs = Vfs::new();
        vfs.mount("user", provider);
        let bytes = vfs
            .read("user/inspect_cache/00000000000000ab.json")
            .unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn malformed_file_is_cache_miss() {
        let provider = MemoryProvider::new();
        provider.insert("inspect_cache/0000000000000001.json", b"not json".to_vec());
        let cache = cache_over(provider);

        assert_eq!(cache.get(CacheKey(1), "Score").unwrap(), None);
    }

    #[test]
    fn overwrite_preserves_other_entries() {
        let cache = cache_over(MemoryProvider::new());
        let key = CacheKey(7);

        cache.set(key, "Score", "1").unwrap();
        cache.set(key, "Tint", "Blue").unwrap();
        cache.set(key, "Score", "2").unwrap();

        let map = cache.load(key).unwrap();
        assert_eq!(map.get("Score"), Some(&"2".to_string()));
        assert_eq!(map.get("Tint"), Some(&"Blue".to_string()));
    }

    #[test]
    fn file_content_is_flat_json() {
        let provider = MemoryProvider::new();
        let cache = cache_over(provider.clone());
        let key = CacheKey(3);

        cache.set(key, "Score", "42").unwrap();
        cache.set(key, "Tint", "Blue").unwrap();

        let bytes = provider
            .read("inspect_cache/0000000000000003.json")
            .unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"Score":"42","Tint":"Blue"}"#
        );
    }
}
