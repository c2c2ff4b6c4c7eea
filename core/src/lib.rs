pub mod context;
pub mod journal;
pub mod mission;
pub mod pipeline;

// Re-exports for convenience
pub use context::watcher::{ChangeWatcher, DashboardEvent, DirectoryWatcher, WatchState};
pub use context::{AppConfig, AppConfigExt, BackgroundTasks, DirectoryIndex, latest_journals};
pub use journal::{JournalEvent, read_events};
pub use mission::format::format_credits;
pub use mission::{FactionStat, Mission, MissionReport, extract_missions};
pub use pipeline::{Dashboard, run_pipeline};
