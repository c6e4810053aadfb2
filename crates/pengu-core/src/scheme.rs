use std::path::{Path, PathBuf};

/// Scheme identifier registered with the webview host.
pub const SCHEME_NAME: &str = "pengu";

/// Directory every `pengu://` URL is resolved against.
///
/// Immutable once registered; handlers share it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeRoot(PathBuf);

impl SchemeRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for SchemeRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for SchemeRoot {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&str> for SchemeRoot {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}
