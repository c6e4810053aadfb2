use std::sync::Arc;

use tracing::debug;

use pengu_core::{
    ports::{AssetFileSystemPort, MimeSnifferPort, SchemeRequest},
    CachePolicy, PathPolicy, SchemeRoot, SCHEME_NAME,
};

use super::AssetRequestHandler;

/// Hands out one [`AssetRequestHandler`] per inbound request.
///
/// Bound to a fixed root at registration time; cheap to clone and safe to
/// share between host threads.
#[derive(Clone)]
pub struct SchemeHandlerFactory {
    scheme_name: String,
    root: Arc<SchemeRoot>,
    policy: PathPolicy,
    cache_policy: CachePolicy,
    mime_sniffer: Arc<dyn MimeSnifferPort>,
    file_system: Arc<dyn AssetFileSystemPort>,
}

impl SchemeHandlerFactory {
    pub fn new(
        root: SchemeRoot,
        mime_sniffer: Arc<dyn MimeSnifferPort>,
        file_system: Arc<dyn AssetFileSystemPort>,
    ) -> Self {
        Self {
            scheme_name: SCHEME_NAME.to_string(),
            root: Arc::new(root),
            policy: PathPolicy::default(),
            cache_policy: CachePolicy::default(),
            mime_sniffer,
            file_system,
        }
    }

    pub fn with_policy(mut self, policy: PathPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn with_scheme_name(mut self, scheme_name: impl Into<String>) -> Self {
        self.scheme_name = scheme_name.into();
        self
    }

    /// Creates a fresh handler for `request`. Never fails.
    ///
    /// The scheme name and request are only used for diagnostics; the
    /// handler reads the URL itself when the host processes the request.
    pub fn create<R: SchemeRequest + ?Sized>(
        &self,
        scheme_name: &str,
        request: &R,
    ) -> AssetRequestHandler {
        debug!(scheme = scheme_name, url = request.url(), "creating pengu request handler");

        AssetRequestHandler::new(
            Arc::clone(&self.root),
            self.policy,
            self.cache_policy,
            Arc::clone(&self.mime_sniffer),
            Arc::clone(&self.file_system),
        )
    }

    pub fn scheme_name(&self) -> &str {
        &self.scheme_name
    }

    pub fn root(&self) -> &SchemeRoot {
        &self.root
    }

    pub fn policy(&self) -> PathPolicy {
        self.policy
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }
}

impl std::fmt::Debug for SchemeHandlerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeHandlerFactory")
            .field("scheme_name", &self.scheme_name)
            .field("root", &self.root)
            .field("policy", &self.policy)
            .field("cache_policy", &self.cache_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pengu_core::{
        ports::{AssetStream, EntryKind},
        HandlerState, MimeType,
    };
    use std::ffi::OsStr;
    use std::io;
    use std::path::Path;

    struct NoMime;

    impl MimeSnifferPort for NoMime {
        fn guess_mime_type(&self, _file_name: &OsStr) -> Option<MimeType> {
            None
        }
    }

    struct NothingOnDisk;

    impl AssetFileSystemPort for NothingOnDisk {
        fn entry_kind(&self, _path: &Path) -> EntryKind {
            EntryKind::Missing
        }

        fn open(&self, _path: &Path) -> io::Result<Box<dyn AssetStream>> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
    }

    fn factory() -> SchemeHandlerFactory {
        SchemeHandlerFactory::new(
            SchemeRoot::from("/assets"),
            Arc::new(NoMime),
            Arc::new(NothingOnDisk),
        )
    }

    #[test]
    fn defaults_to_pengu_scheme_and_unrestricted_policy() {
        let factory = factory();

        assert_eq!(factory.scheme_name(), "pengu");
        assert_eq!(factory.policy(), PathPolicy::Unrestricted);
        assert_eq!(factory.cache_policy(), CachePolicy::Disabled);
        assert_eq!(factory.root().as_path(), Path::new("/assets"));
    }

    #[test]
    fn every_create_returns_an_idle_handler() {
        let factory = factory();

        let first = factory.create("pengu", "pengu://www/a.js");
        let second = factory.create("pengu", "pengu://www/b.js");

        assert_eq!(first.state(), HandlerState::Idle);
        assert_eq!(second.state(), HandlerState::Idle);
    }

    #[test]
    fn handlers_resolve_against_factory_root_and_policy() {
        let factory = factory().with_policy(PathPolicy::ConfinedToRoot);
        let mut handler = factory.create("pengu", "pengu://www//app.js");

        let result = handler.process_request("pengu://www//app.js", Box::new(|| {}));

        assert_eq!(result, Err(pengu_core::RejectReason::EscapesRoot));
    }

    #[test]
    fn scheme_name_can_be_overridden() {
        let factory = factory().with_scheme_name("assets");

        assert_eq!(factory.scheme_name(), "assets");
    }
}
