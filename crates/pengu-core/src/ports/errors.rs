use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,

    #[error("runtime directory is unavailable: {0}")]
    RuntimeDirUnavailable(String),
}
