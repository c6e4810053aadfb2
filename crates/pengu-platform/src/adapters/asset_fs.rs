//! Filesystem-backed asset access

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use pengu_core::ports::{AssetFileSystemPort, AssetStream, EntryKind};

/// Reads assets straight from the local filesystem.
///
/// `entry_kind` follows symlinks, so a link to a regular file counts as a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdAssetFileSystem;

impl StdAssetFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl AssetFileSystemPort for StdAssetFileSystem {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(err) => {
                tracing::trace!(path = %path.display(), error = %err, "asset path not inspectable");
                EntryKind::Missing
            }
        }
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn AssetStream>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}
