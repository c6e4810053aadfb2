pub mod config;
pub mod tracing;
pub mod wiring;

#[cfg(feature = "tauri")]
pub mod logging;
#[cfg(feature = "tauri")]
pub mod run;

pub use config::load_config;
pub use wiring::{build_scheme_factory, register_pengu_scheme};

#[cfg(feature = "tauri")]
pub use run::{register_scheme_protocol, run_app};
