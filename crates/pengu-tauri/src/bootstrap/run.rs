//! Webview host startup.

use std::sync::Arc;

use anyhow::Context;
use tauri::{Builder, Runtime, Wry};

use pengu_app::{SchemeHandlerFactory, ServeAssetUseCase};
use pengu_core::config::AppConfig;
use pengu_platform::DirsAppDirsAdapter;

use super::{logging, wiring::build_scheme_factory};
use crate::protocol::handle_pengu_request;

/// Register `factory`'s scheme on a Tauri builder.
///
/// Each request runs its whole handler lifecycle on the blocking pool and is
/// answered through the responder exactly once.
pub fn register_scheme_protocol<R: Runtime>(
    builder: Builder<R>,
    factory: SchemeHandlerFactory,
) -> Builder<R> {
    let scheme = factory.scheme_name().to_string();
    let use_case = Arc::new(ServeAssetUseCase::new(Arc::new(factory)));

    builder.register_asynchronous_uri_scheme_protocol(
        scheme.clone(),
        move |_ctx, request, responder| {
            let use_case = Arc::clone(&use_case);
            let scheme = scheme.clone();
            tauri::async_runtime::spawn_blocking(move || {
                let response = handle_pengu_request(&use_case, &scheme, &request);
                responder.respond(response);
            });
        },
    )
}

/// Build and run the webview application with the configured scheme.
///
/// `context` comes from `tauri::generate_context!()` in the application binary.
pub fn run_app(config: AppConfig, context: tauri::Context<Wry>) -> anyhow::Result<()> {
    let factory = build_scheme_factory(&config, &DirsAppDirsAdapter::new())?;

    let builder = tauri::Builder::default().plugin(logging::get_builder().build());

    register_scheme_protocol(builder, factory)
        .run(context)
        .context("error while running tauri application")
}
