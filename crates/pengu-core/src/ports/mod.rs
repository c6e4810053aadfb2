//! Port interfaces for the application layer
//!
//! Ports define the contract between the request handler (use cases) and the
//! host runtime, filesystem and platform implementations. The handler never
//! talks to `std::fs`, the OS MIME facility or the webview directly.

pub mod app_dirs;
mod asset_fs;
mod continuation;
pub mod errors;
mod mime_sniffer;
mod request;

pub use app_dirs::AppDirsPort;
pub use asset_fs::{AssetFileSystemPort, AssetStream, EntryKind};
pub use continuation::RequestCallback;
pub use errors::AppDirsError;
pub use mime_sniffer::MimeSnifferPort;
pub use request::SchemeRequest;
