//! Logging plugin configuration for the webview host
//!
//! - **Development**: Debug level, outputs to the webview console
//! - **Production**: Info level, outputs to `pengu.log` in the log dir + stdout

use log::LevelFilter;
use tauri_plugin_log::{Target, TargetKind, TimezoneStrategy};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Create the `tauri-plugin-log` builder for the current build profile.
///
/// Host-internal targets (`tauri::`, `wry::`, `tracing::`) are filtered so the
/// webview target does not log its own log events.
pub fn get_builder() -> tauri_plugin_log::Builder {
    let is_dev = is_development();
    let default_log_level = if is_dev {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = tauri_plugin_log::Builder::new()
        .timezone_strategy(TimezoneStrategy::UseLocal)
        .level(default_log_level)
        .filter(|metadata| {
            let target = metadata.target();
            !(target.starts_with("tauri::")
                || target.starts_with("tracing::")
                || target.contains("tauri-")
                || target.starts_with("wry::"))
        })
        .format(move |out, message, record| {
            // 2025-12-29 10:30:45.123 INFO [scheme_handler_factory.rs:34] [pengu_app] message
            out.finish(format_args!(
                "{} {} [{}:{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.target(),
                message,
            ))
        });

    if is_dev {
        builder = builder.target(Target::new(TargetKind::Webview));
    } else {
        builder = builder
            .target(Target::new(TargetKind::LogDir {
                file_name: Some("pengu".to_string()),
            }))
            .target(Target::new(TargetKind::Stdout));
    }

    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_builder() {
        let _builder = get_builder();
    }
}
