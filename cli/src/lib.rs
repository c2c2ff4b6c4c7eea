pub mod commands;
pub mod context;
pub mod dashboard;
pub mod dir_watcher;
pub mod logging;

pub use context::CliContext;
