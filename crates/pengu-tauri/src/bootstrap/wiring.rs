//! Dependency wiring: turns configuration facts into a ready scheme factory.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use pengu_app::SchemeHandlerFactory;
use pengu_core::{
    config::AppConfig, ports::AppDirsPort, CachePolicy, PathPolicy, SchemeRoot, SCHEME_NAME,
};
use pengu_platform::{MimeGuessSniffer, StdAssetFileSystem};

/// Register the `pengu` scheme against `root` with the platform adapters.
///
/// Returns the factory instead of storing it anywhere; the caller hands it to
/// the webview host.
pub fn register_pengu_scheme(root: impl Into<PathBuf>) -> SchemeHandlerFactory {
    SchemeHandlerFactory::new(
        SchemeRoot::new(root),
        Arc::new(MimeGuessSniffer::new()),
        Arc::new(StdAssetFileSystem::new()),
    )
}

/// Build the scheme factory described by `config`.
///
/// An empty asset root means "serve from the runtime directory"; an empty
/// scheme name means `pengu`.
pub fn build_scheme_factory(
    config: &AppConfig,
    app_dirs: &dyn AppDirsPort,
) -> anyhow::Result<SchemeHandlerFactory> {
    let root = if config.asset_root.as_os_str().is_empty() {
        app_dirs
            .get_app_dirs()
            .context("Failed to resolve runtime directory for asset root")?
            .runtime_root
    } else {
        config.asset_root.clone()
    };

    let scheme_name = if config.scheme_name.is_empty() {
        SCHEME_NAME
    } else {
        config.scheme_name.as_str()
    };

    let factory = register_pengu_scheme(root)
        .with_scheme_name(scheme_name)
        .with_policy(PathPolicy::from_confine_flag(config.confine_to_root))
        .with_cache_policy(CachePolicy::from_cache_flag(config.cache_headers));

    tracing::info!(
        scheme = factory.scheme_name(),
        root = %factory.root().as_path().display(),
        policy = ?factory.policy(),
        cache = ?factory.cache_policy(),
        "scheme handler factory registered"
    );

    Ok(factory)
}
