//! Tracing configuration
//!
//! Installs the global `tracing-subscriber` registry: an env filter, a stdout
//! layer and, when the log directory is writable, a non-blocking file layer.
//! Output format: `2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message`.

use std::{fs, io, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};
use pengu_core::ports::AppDirsPort;

const LOG_FILE_NAME: &str = "pengu.log";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// - **Development**: debug for the app, debug for the scheme crates
/// - **Production**: info everywhere
/// - Host noise (`wry` custom protocol spans, `tauri` setup spans) is muted
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let crate_level = if is_dev { "debug" } else { "info" };
    vec![
        crate_level.to_string(),
        "tauri=warn".to_string(),
        "wry=off".to_string(),
        format!("pengu_app={crate_level}"),
        format!("pengu_platform={crate_level}"),
        format!("pengu_core={crate_level}"),
    ]
}

/// Initialize the tracing subscriber with appropriate configuration
///
/// - Respects `RUST_LOG`, falling back to [`build_filter_directives`]
/// - Falls back to stdout-only when the log file cannot be created
///
/// Call once, before the webview host is built.
///
/// # Errors
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(app_dirs: &dyn AppDirsPort) -> anyhow::Result<()> {
    let is_dev = is_development();

    let filter_directives = build_filter_directives(is_dev);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stdout_writer: BoxMakeWriter = BoxMakeWriter::new(io::stdout);
    let file_writer = match build_file_writer(app_dirs) {
        Ok(writer) => Some(writer),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err}");
            None
        }
    };

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stdout_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(
                "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            ))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(app_dirs: &dyn AppDirsPort) -> anyhow::Result<NonBlocking> {
    let logs_dir = app_dirs.get_app_dirs()?.logs_dir();
    fs::create_dir_all(&logs_dir)?;

    let file_appender = tracing_appender::rolling::never(&logs_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}
