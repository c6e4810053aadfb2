//! URL-to-filesystem path resolution.
//!
//! `pengu://HOST/SEG1/SEG2` maps to `root/HOST/SEG1/SEG2`: the authority is the
//! first path segment and carries no other meaning. Segments are appended
//! verbatim, `.` and `..` included, unless [`PathPolicy::ConfinedToRoot`] is
//! selected.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::handler_state::RejectReason;
use crate::scheme::SchemeRoot;

/// How URL segments are allowed to move relative to the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathPolicy {
    /// Every segment becomes a path component as-is.
    #[default]
    Unrestricted,
    /// Every segment must be a single plain file name; `.`, `..`, empty
    /// segments and anything carrying a root or drive prefix are rejected.
    ConfinedToRoot,
}

impl PathPolicy {
    pub fn from_confine_flag(confine_to_root: bool) -> Self {
        if confine_to_root {
            PathPolicy::ConfinedToRoot
        } else {
            PathPolicy::Unrestricted
        }
    }
}

/// Filesystem path derived from one request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath(PathBuf);

impl ResolvedPath {
    /// Joins `host ++ path` onto `root`, one component per `/`-delimited segment.
    ///
    /// A trailing `/` does not produce an extra component; every other segment,
    /// empty ones included, is appended in order.
    pub fn resolve(
        root: &SchemeRoot,
        host: &str,
        path: &str,
        policy: PathPolicy,
    ) -> Result<Self, RejectReason> {
        let joined = format!("{host}{path}");
        let mut resolved = root.as_path().to_path_buf();

        for segment in joined.split_terminator('/') {
            if policy == PathPolicy::ConfinedToRoot && !is_plain_segment(segment) {
                #[cfg(feature = "tracing")]
                tracing::debug!(segment, "segment escapes scheme root");
                return Err(RejectReason::EscapesRoot);
            }
            resolved.push(segment);
        }

        Ok(Self(resolved))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> Option<&OsStr> {
        self.0.file_name()
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> SchemeRoot {
        SchemeRoot::from("/assets")
    }

    #[test]
    fn host_becomes_first_segment() {
        let resolved =
            ResolvedPath::resolve(&root(), "www", "/index.html", PathPolicy::Unrestricted)
                .unwrap();

        assert_eq!(resolved.as_path(), Path::new("/assets/www/index.html"));
        assert_eq!(resolved.file_name(), Some(OsStr::new("index.html")));
    }

    #[test]
    fn segments_are_appended_in_order() {
        let resolved =
            ResolvedPath::resolve(&root(), "h", "/a/b/c", PathPolicy::Unrestricted).unwrap();

        let expected = PathBuf::from("/assets").join("h").join("a").join("b").join("c");
        assert_eq!(resolved.into_path_buf(), expected);
    }

    #[test]
    fn dot_segments_are_not_collapsed() {
        let resolved =
            ResolvedPath::resolve(&root(), "www", "/../secret.txt", PathPolicy::Unrestricted)
                .unwrap();

        assert_eq!(
            resolved.as_path(),
            Path::new("/assets/www/../secret.txt"),
            "unrestricted policy keeps parent segments verbatim"
        );
    }

    #[test]
    fn trailing_slash_adds_no_component() {
        let resolved =
            ResolvedPath::resolve(&root(), "www", "/css/", PathPolicy::Unrestricted).unwrap();

        assert_eq!(resolved.file_name(), Some(OsStr::new("css")));
    }

    #[test]
    fn confined_policy_rejects_parent_segment() {
        let result =
            ResolvedPath::resolve(&root(), "www", "/../secret.txt", PathPolicy::ConfinedToRoot);

        assert_eq!(result, Err(RejectReason::EscapesRoot));
    }

    #[test]
    fn confined_policy_rejects_current_dir_and_empty_segments() {
        assert_eq!(
            ResolvedPath::resolve(&root(), "www", "/./a.js", PathPolicy::ConfinedToRoot),
            Err(RejectReason::EscapesRoot)
        );
        assert_eq!(
            ResolvedPath::resolve(&root(), "www", "//a.js", PathPolicy::ConfinedToRoot),
            Err(RejectReason::EscapesRoot)
        );
    }

    #[test]
    fn confined_policy_accepts_plain_segments() {
        let resolved =
            ResolvedPath::resolve(&root(), "www", "/js/app.js", PathPolicy::ConfinedToRoot)
                .unwrap();

        assert_eq!(resolved.as_path(), Path::new("/assets/www/js/app.js"));
    }

    #[test]
    fn confine_flag_maps_to_policy() {
        assert_eq!(PathPolicy::from_confine_flag(true), PathPolicy::ConfinedToRoot);
        assert_eq!(PathPolicy::from_confine_flag(false), PathPolicy::Unrestricted);
    }
}
