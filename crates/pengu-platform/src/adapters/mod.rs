pub mod asset_fs;
pub mod mime;

pub use asset_fs::StdAssetFileSystem;
pub use mime::MimeGuessSniffer;
