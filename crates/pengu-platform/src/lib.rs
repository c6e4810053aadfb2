//! # pengu-platform
//!
//! Platform-specific implementations for the `pengu://` scheme.
//!
//! This crate contains the adapters that touch the operating system: the
//! filesystem, the MIME type table and the per-user/runtime directories.

pub mod adapters;
pub mod app_dirs;

pub use adapters::{MimeGuessSniffer, StdAssetFileSystem};
pub use app_dirs::DirsAppDirsAdapter;
