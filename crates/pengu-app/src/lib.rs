//! Pengu Scheme Orchestration Layer
//!
//! This crate contains the request handler state machine, the factory that
//! hands out one handler per request, and the use case that drives a full
//! handler lifecycle the way a webview host does.

pub mod usecases;

pub use usecases::{
    AssetRequestHandler, SchemeHandlerFactory, ServeAssetUseCase, ServeError, ServedAsset,
};
