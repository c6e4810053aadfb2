use std::path::PathBuf;

use pengu_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

const APP_DIR_NAME: &str = "pengu";

fn resolved_app_dir_name() -> String {
    match std::env::var("PENGU_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
    runtime_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    /// Creates a new DirsAppDirsAdapter with no directory overrides.
    ///
    /// # Examples
    ///
    /// ```
    /// use pengu_platform::app_dirs::DirsAppDirsAdapter;
    /// let _ = DirsAppDirsAdapter::new();
    /// ```
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
            runtime_dir_override: None,
        }
    }

    /// Creates a test-only adapter with fixed base data and runtime directories.
    #[cfg(test)]
    pub fn with_overrides(base: PathBuf, runtime: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
            runtime_dir_override: Some(runtime),
        }
    }

    /// Resolve the base local data directory used for application data.
    ///
    /// Returns the override if one was set, otherwise `dirs::data_local_dir()`.
    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }

    /// Directory holding the running executable.
    fn runtime_dir(&self) -> Result<PathBuf, AppDirsError> {
        if let Some(runtime) = &self.runtime_dir_override {
            return Ok(runtime.clone());
        }
        let exe = std::env::current_exe()
            .map_err(|err| AppDirsError::RuntimeDirUnavailable(err.to_string()))?;
        exe.parent().map(PathBuf::from).ok_or_else(|| {
            AppDirsError::RuntimeDirUnavailable(format!(
                "executable has no parent directory: {}",
                exe.display()
            ))
        })
    }
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    /// `app_data_root` is the local data directory joined with `pengu` (or
    /// `pengu-<profile>` when `PENGU_PROFILE` is set); `runtime_root` is the
    /// executable's directory.
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base_data.join(resolved_app_dir_name()),
            runtime_root: self.runtime_dir()?,
        })
    }
}
