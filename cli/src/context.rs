use missionboard_core::context::{AppConfig, AppConfigExt, BackgroundTasks};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

/// One-run overrides from the command line. Never persisted.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub log_directory: Option<PathBuf>,
    pub journal_count: Option<usize>,
    pub poll_interval_secs: Option<u64>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(mut config: AppConfig) -> Self {
        config.normalize();
        Self {
            config: Arc::new(RwLock::new(config)),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    pub async fn apply_overrides(&self, overrides: ConfigOverrides) {
        let mut config = self.config.write().await;
        if let Some(dir) = overrides.log_directory {
            config.log_directory = dir.to_string_lossy().to_string();
        }
        if let Some(count) = overrides.journal_count {
            config.journal_count = count;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            config.poll_interval_secs = secs;
        }
        config.normalize();
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_overrides() {
        let ctx = CliContext::with_config(AppConfig::with_log_directory("/saved".to_string()));
        ctx.apply_overrides(ConfigOverrides {
            log_directory: Some(PathBuf::from("/override")),
            journal_count: Some(0),
            poll_interval_secs: None,
        })
        .await;

        let config = ctx.config.read().await;
        assert_eq!(config.log_directory, "/override");
        assert_eq!(config.journal_count, 1);
        assert_eq!(config.poll_interval_secs, 5);
    }

    #[tokio::test]
    async fn test_zero_values_never_reach_live_settings() {
        let mut config = AppConfig::with_log_directory("/saved".to_string());
        config.journal_count = 0;
        config.poll_interval_secs = 0;
        let ctx = CliContext::with_config(config);

        let config = ctx.config.read().await;
        assert_eq!(config.journal_count, 1);
        assert_eq!(config.poll_interval_secs, 1);
    }
}
