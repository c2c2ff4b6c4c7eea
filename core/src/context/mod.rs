mod background_tasks;
mod config;
mod error;
mod log_files;
pub mod watcher;

pub use background_tasks::BackgroundTasks;
pub use config::{AppConfig, AppConfigExt, default_log_directory};
pub use error::{ConfigError, WatcherError};
pub use log_files::{
    DirectoryIndex, JournalFileMetaData, is_journal, latest_journals, parse_journal_filename,
};
