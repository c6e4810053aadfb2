//! # Pure Data Module - Data Transfer Objects Only
//!
//! Maps the TOML configuration file onto [`AppConfig`]. No validation and no
//! default-value policy lives here: missing keys become empty values, and the
//! wiring layer decides what an empty value means.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Scheme to register (may be empty; wiring falls back to `pengu`)
    pub scheme_name: String,

    /// Directory assets are served from (path info only, no existence check)
    pub asset_root: PathBuf,

    /// Reject URL segments that would leave the asset root
    pub confine_to_root: bool,

    /// Attach `Cache-Control`/`Etag` headers to served assets
    pub cache_headers: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// ```toml
    /// [scheme]
    /// name = "pengu"
    /// root = "/opt/pengu/runtime"
    /// confine_to_root = false
    /// cache_headers = false
    /// ```
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let scheme = toml_value.get("scheme");

        Ok(Self {
            scheme_name: scheme
                .and_then(|s| s.get("name"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            asset_root: PathBuf::from(
                scheme
                    .and_then(|s| s.get("root"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            confine_to_root: scheme
                .and_then(|s| s.get("confine_to_root"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            cache_headers: scheme
                .and_then(|s| s.get("cache_headers"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            scheme_name: String::new(),
            asset_root: PathBuf::new(),
            confine_to_root: false,
            cache_headers: false,
        }
    }

    /// Create AppConfig serving assets straight from the runtime directory
    ///
    /// The runtime directory is computed by the caller (see `AppDirsPort`).
    pub fn with_system_defaults(runtime_root: PathBuf) -> Self {
        Self {
            scheme_name: crate::scheme::SCHEME_NAME.to_string(),
            asset_root: runtime_root,
            confine_to_root: false,
            cache_headers: false,
        }
    }
}
