//! # pengu-core
//!
//! Core domain models and ports for the `pengu://` asset scheme.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! URL-to-path resolution, response metadata, the request handler lifecycle
//! states, and the ports implemented by the platform and host layers.

pub mod app_dirs;
pub mod config;
pub mod handler_state;
pub mod mime;
pub mod path;
pub mod ports;
pub mod response;
pub mod scheme;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use handler_state::{HandlerState, RejectReason};
pub use mime::MimeType;
pub use path::{PathPolicy, ResolvedPath};
pub use response::{CachePolicy, ReadOutcome, ResponseHead};
pub use scheme::{SchemeRoot, SCHEME_NAME};
