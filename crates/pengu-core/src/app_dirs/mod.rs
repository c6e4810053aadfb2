use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Per-user application data (logs live under it).
    pub app_data_root: PathBuf,
    /// Directory of the running executable; default asset root.
    pub runtime_root: PathBuf,
}

impl AppDirs {
    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }
}
