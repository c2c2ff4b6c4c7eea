//! Application configuration
//!
//! Re-exports the shared `AppConfig` from missionboard-types and adds the
//! platform-specific default journal directory and confy persistence.

use std::path::{Path, PathBuf};

pub use missionboard_types::AppConfig;

use crate::context::ConfigError;

const APP_NAME: &str = "missionboard";
const CONFIG_NAME: &str = "config";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Defaults
// ─────────────────────────────────────────────────────────────────────────────

const JOURNAL_SUBDIR: &str = "Saved Games/Frontier Developments/Elite Dangerous";

pub fn default_log_directory() -> String {
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        dirs::home_dir()
            .map(|p| {
                p.join(".local/share/Steam/steamapps/compatdata/359320/pfx/drive_c/users/steamuser")
                    .join(JOURNAL_SUBDIR)
            })
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default()
    }
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    {
        dirs::home_dir()
            .map(|p| p.join(JOURNAL_SUBDIR))
            .and_then(|p| p.to_str().map(String::from))
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig Extensions
// ─────────────────────────────────────────────────────────────────────────────

/// Extension trait for AppConfig persistence
pub trait AppConfigExt: Sized {
    fn load() -> Self;
    fn load_with_defaults() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    fn config_path() -> Result<PathBuf, ConfigError>;
    fn set_log_directory(&mut self, path: &Path) -> Result<(), ConfigError>;
    fn log_path(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        match confy::load::<AppConfig>(APP_NAME, CONFIG_NAME) {
            Ok(config) => complete_loaded(config),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load configuration, using defaults");
                Self::load_with_defaults()
            }
        }
    }

    /// Load with platform-specific defaults (used when no config file exists)
    fn load_with_defaults() -> Self {
        AppConfig::with_log_directory(default_log_directory())
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, CONFIG_NAME, self).map_err(ConfigError::Save)
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)?)
    }

    fn set_log_directory(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.is_dir() {
            return Err(ConfigError::InvalidDirectory {
                path: path.to_path_buf(),
            });
        }
        self.log_directory = path.to_string_lossy().to_string();
        Ok(())
    }

    fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.log_directory)
    }
}

/// Fill in what a hand-edited config file may leave empty or zeroed.
fn complete_loaded(mut config: AppConfig) -> AppConfig {
    if config.log_directory.is_empty() {
        config.log_directory = default_log_directory();
    }
    config.normalize();
    config
}
