use std::collections::HashMap;
use std::sync::Arc;

use crate::error::VfsError;
use crate::path;
use crate::provider::VfsProvider;

/// Router mapping the first segment of a virtual path to a mounted
/// provider.
///
/// The scripting host mounts its well-known sources once at startup —
/// `res` for shipped game content, `user` for writable per-user state such
/// as the inspector's serialization cache — then hands clones of the `Vfs`
/// to every consumer. Cloning shares the mount table (`Arc` inside);
/// mounting after the first clone panics, which pins all configuration to
/// the startup phase.
///
/// When a path's first segment matches no mount, the configured default
/// source (if any) is consulted with the whole path, so `"settings.json"`
/// can resolve as `"user/settings.json"`.
#[derive(Clone)]
pub struct Vfs {
    inner: Arc<VfsInner>,
}

struct VfsInner {
    sources: HashMap<String, Box<dyn VfsProvider>>,
    default_source: Option<String>,
}

impl Vfs {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VfsInner {
                sources: HashMap::new(),
                default_source: None,
            }),
        }
    }

    /// Mount `provider` under `name`, replacing any previous mount with
    /// the same name.
    ///
    /// # Panics
    ///
    /// Panics once the `Vfs` has been cloned; mounting belongs to the
    /// startup phase.
    pub fn mount(&mut self, name: impl Into<String>, provider: impl VfsProvider) {
        let inner = Arc::get_mut(&mut self.inner).expect("cannot mount after Vfs has been cloned");
        let name = name.into();
        log::debug!("mounting VFS source '{name}'");
        inner.sources.insert(name, Box::new(provider));
    }

    /// Name the source consulted when a path matches no mount.
    ///
    /// # Panics
    ///
    /// Panics once the `Vfs` has been cloned, like [`mount`](Self::mount).
    pub fn set_default(&mut self, name: impl Into<String>) {
        let inner =
            Arc::get_mut(&mut self.inner).expect("cannot set default after Vfs has been cloned");
        inner.default_source = Some(name.into());
    }

    /// Read the whole file at `raw_path`.
    pub fn read(&self, raw_path: &str) -> Result<Vec<u8>, VfsError> {
        let (provider, local) = self.resolve(raw_path)?;
        provider.read(&local)
    }

    /// Whether a file exists at `raw_path`.
    pub fn exists(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, local) = self.resolve(raw_path)?;
        provider.exists(&local)
    }

    /// Immediate children of the directory at `raw_path`.
    pub fn list_dir(&self, raw_path: &str) -> Result<Vec<String>, VfsError> {
        let (provider, local) = self.resolve(raw_path)?;
        provider.list_dir(&local)
    }

    /// Create or overwrite the file at `raw_path`.
    ///
    /// Fails with [`VfsError::ReadOnly`] when the resolved provider does
    /// not support writes.
    pub fn write(&self, raw_path: &str, data: Vec<u8>) -> Result<(), VfsError> {
        let (provider, local) = self.resolve(raw_path)?;
        provider.write(&local, data)
    }

    /// Delete the file at `raw_path`.
    pub fn delete(&self, raw_path: &str) -> Result<(), VfsError> {
        let (provider, local) = self.resolve(raw_path)?;
        provider.delete(&local)
    }

    /// Create the directory at `raw_path`, including missing parents.
    pub fn create_dir(&self, raw_path: &str) -> Result<(), VfsError> {
        let (provider, local) = self.resolve(raw_path)?;
        provider.create_dir(&local)
    }

    /// Whether the provider behind `raw_path` refuses writes.
    pub fn is_read_only(&self, raw_path: &str) -> Result<bool, VfsError> {
        let (provider, _) = self.resolve(raw_path)?;
        Ok(provider.is_read_only())
    }

    // Normalizes, then picks the provider: an exact mount for the first
    // segment wins; otherwise the default source sees the full path.
    fn resolve(&self, raw_path: &str) -> Result<(&dyn VfsProvider, String), VfsError> {
        let normalized = path::normalize(raw_path)?;
        let (source, local) = path::split_source(&normalized);

        if let Some(provider) = self.inner.sources.get(source) {
            return Ok((provider.as_ref(), local.to_owned()));
        }

        if let Some(default_name) = &self.inner.default_source
            && let Some(provider) = self.inner.sources.get(default_name)
        {
            return Ok((provider.as_ref(), normalized));
        }

        Err(VfsError::UnknownSource(source.to_owned()))
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}
