use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// Provider that keeps its files in a shared in-memory map.
///
/// The backbone of the test suites: a cache store mounted over a
/// `MemoryProvider` behaves exactly like one over a real directory, and
/// the provider can be cloned before mounting to inspect what the store
/// wrote. Also usable for content embedded into the binary at startup.
///
/// There are no directory entries — a directory exists exactly when some
/// file path passes through it.
#[derive(Clone)]
pub struct MemoryProvider {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Seed or replace a file. Paths are provider-local: forward slashes,
    /// no leading separator.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) {
        self.files.write().insert(path.into(), data);
    }

    /// Drop a file, returning its data if it was present.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(path)
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VfsProvider for MemoryProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))
    }

    fn exists(&self, path: &str) -> Result<bool, VfsError> {
        Ok(self.files.read().contains_key(path))
    }

    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError> {
        let files = self.files.read();
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        // Keys are sorted, so children come out sorted and duplicates are
        // always adjacent.
        let mut children: Vec<String> = Vec::new();
        for key in files.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            let child = match rest.split_once('/') {
                Some((first, _)) => first,
                None => rest,
            };
            if child.is_empty() {
                continue;
            }
            if children.last().map(String::as_str) != Some(child) {
                children.push(child.to_owned());
            }
        }
        Ok(children)
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn write(&self, path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        self.files.write().insert(path.to_owned(), data);
        Ok(())
    }

    fn delete(&self, path: &str) -> Result<(), VfsError> {
        self.files
            .write()
            .remove(path)
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))?;
        Ok(())
    }

    fn create_dir(&self, _path: &str) -> Result<(), VfsError> {
        // Directories are implied by file paths.
        Ok(())
    }
}
