pub mod request_handler;
pub mod scheme_handler_factory;
pub mod serve_asset;

pub use request_handler::AssetRequestHandler;
pub use scheme_handler_factory::SchemeHandlerFactory;
pub use serve_asset::{ServeAssetUseCase, ServeError, ServedAsset, DEFAULT_CHUNK_SIZE};
