//! Shared configuration types for missionboard
//!
//! These types are plain serde data. Persistence (load/save) lives in
//! missionboard-core behind the `AppConfigExt` trait since it needs
//! platform-specific dependencies.

use serde::{Deserialize, Serialize};

/// Journal files read per pipeline run when nothing else is configured.
pub const DEFAULT_JOURNAL_COUNT: usize = 3;

/// Change watcher tick, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

fn default_journal_count() -> usize {
    DEFAULT_JOURNAL_COUNT
}
fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}
fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub log_directory: String,

    /// How many of the newest journal files feed the mission list.
    #[serde(default = "default_journal_count")]
    pub journal_count: usize,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Follow the game onto new journal files as sessions start.
    #[serde(default = "default_true")]
    pub watch_new_journals: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::with_log_directory(String::new())
    }
}

impl AppConfig {
    /// Create a new AppConfig with the specified log directory.
    /// Other fields use their default values.
    pub fn with_log_directory(log_directory: String) -> Self {
        Self {
            log_directory,
            journal_count: DEFAULT_JOURNAL_COUNT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            watch_new_journals: true,
        }
    }

    /// Raise zero counts and intervals to 1. A zero count would hide every
    /// journal and a zero interval would poll without sleeping.
    pub fn normalize(&mut self) {
        self.journal_count = self.journal_count.max(1);
        self.poll_interval_secs = self.poll_interval_secs.max(1);
    }
}
