//! # Configuration Loader
//!
//! Reads the TOML configuration file into the [`AppConfig`] DTO.
//! Pure data loading: no validation and no defaults. Empty values are facts
//! that [`super::wiring`] interprets.

use anyhow::Context;
use std::path::PathBuf;
use pengu_core::config::AppConfig;

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value = toml::from_str(&content)
        .context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}
