//! Virtual file system abstraction for the Saffron scripting host.
//!
//! Provides a unified, synchronous API for reading and writing files from
//! multiple storage backends through the [`VfsProvider`] trait and the
//! [`Vfs`] router.
//!
//! # Sources
//!
//! Paths are structured as `"source_name/rest/of/path"`. The host mounts
//! providers under well-known source prefixes; by convention the scripting
//! host uses `res` for read-only game content and `user` for writable
//! per-user data (the serialization cache lives there).
//!
//! # Providers
//!
//! - [`MemoryProvider`] — In-memory storage for tests and embedded data (read-write)
//! - [`FileSystemProvider`] — Native filesystem access (read-write)
//!
//! Custom providers can implement the [`VfsProvider`] trait for packed
//! archives or other storage backends.
//!
//! # Read-Only vs Read-Write
//!
//! All providers must implement read operations. Write operations are
//! optional and default to returning [`VfsError::ReadOnly`]. Use
//! [`VfsProvider::is_read_only()`] to check capability.

mod error;
#[cfg(feature = "filesystem")]
mod filesystem;
mod memory;
pub mod path;
mod provider;
mod vfs;

pub use error::VfsError;
#[cfg(feature = "filesystem")]
pub use filesystem::FileSystemProvider;
pub use memory::MemoryProvider;
pub use provider::VfsProvider;
pub use vfs::Vfs;
