use std::io::{self, Read, Seek};
use std::path::Path;

/// What a resolved path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Absent, or not inspectable (permission errors land here too).
    Missing,
}

/// Sequential, seekable byte stream over one asset.
pub trait AssetStream: Read + Seek + Send {}

impl<T: Read + Seek + Send> AssetStream for T {}

/// Filesystem access needed to serve assets.
pub trait AssetFileSystemPort: Send + Sync {
    fn entry_kind(&self, path: &Path) -> EntryKind;

    /// Opens `path` for binary reading from offset zero.
    fn open(&self, path: &Path) -> io::Result<Box<dyn AssetStream>>;
}
