//! # pengu-tauri
//!
//! Webview host integration for the `pengu://` scheme.
//!
//! This crate provides:
//! - Request parsing and response building for the host's HTTP types
//! - Bootstrap: configuration loading, tracing, dependency wiring
//! - Behind the `tauri` feature: protocol registration, log plugin and app runner
//!
//! ## Modules
//!
//! - **protocol**: `pengu://` request/response translation
//! - **bootstrap**: startup helpers used by the application binary

pub mod bootstrap;
pub mod protocol;

pub use protocol::{handle_pengu_request, parse_pengu_request, PenguRequest, PenguRequestError};
