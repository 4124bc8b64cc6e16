use crate::VfsError;

/// Trait for virtual file system backends.
///
/// Providers implement byte-level I/O operations. All operations are
/// synchronous; the scripting host issues them from its single main-thread
/// tick, so there is nothing to overlap with.
///
/// # Read vs Write
///
/// All providers must implement read operations (`read`, `exists`,
/// `list_dir`). Write operations (`write`, `delete`, `create_dir`) have
/// default implementations that return [`VfsError::ReadOnly`]. Providers
/// that support writes override these methods and return `false` from
/// [`is_read_only()`](VfsProvider::is_read_only).
///
/// # Path Contract
///
/// Paths passed to provider methods are already normalized by the
/// [`Vfs`](crate::Vfs) router: forward slashes, no leading/trailing
/// slashes, no `..` or `.` segments. The path is relative to the
/// provider's root (the source prefix has been stripped).
pub trait VfsProvider: Send + Sync + 'static {
    // --- Read operations (required) ---

    /// Read the entire contents of a file at the given path.
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Check whether a file exists at the given path.
    fn exists(&self, path: &str) -> Result<bool, VfsError>;

    /// List the immediate children of a directory.
    ///
    /// Returns file and directory names (not full paths).
    /// Returns an empty vec for non-existent directories.
    fn list_dir(&self, path: &str) -> Result<Vec<String>, VfsError>;

    // --- Write operations (optional, default returns ReadOnly) ---

    /// Whether this provider is read-only.
    ///
    /// Returns `true` by default. Providers that support writes should
    /// override this to return `false`.
    fn is_read_only(&self) -> bool {
        true
    }

    /// Write data to a file, creating or overwriting it.
    fn write(&self, path: &str, _data: Vec<u8>) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly(path.to_owned()))
    }

    /// Delete a file at the given path.
    fn delete(&self, path: &str) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly(path.to_owned()))
    }

    /// Create a directory (and any missing parents) at the given path.
    fn create_dir(&self, path: &str) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly(path.to_owned()))
    }
}
