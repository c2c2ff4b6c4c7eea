//! Error types for journal reading

use std::path::PathBuf;
use thiserror::Error;

/// Errors during journal file reading operations
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("failed to open journal file {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
