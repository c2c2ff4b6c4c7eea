use chrono::NaiveDateTime;
use hashbrown::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::context::WatcherError;

const JOURNAL_PREFIX: &str = "Journal";
const JOURNAL_SUFFIX: &str = ".log";

/// Matches `Journal*.log`
pub fn is_journal(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with(JOURNAL_PREFIX) && n.ends_with(JOURNAL_SUFFIX))
        .unwrap_or(false)
}

/// Up to `count` journal files, newest first.
///
/// Journal names embed the session start, so a descending name sort is a
/// newest-first sort. A missing or unreadable directory yields no files.
pub fn latest_journals(dir: &Path, count: usize) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "Journal directory unavailable");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .filter(|p| is_journal(p))
        .collect();

    files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    files.truncate(count);
    files
}

pub struct JournalFileMetaData {
    pub path: PathBuf,
    pub filename: String,
    pub started_at: Option<NaiveDateTime>,
    pub part: Option<u32>,
    pub file_size: u64,
}

impl JournalFileMetaData {
    pub fn is_empty(&self) -> bool {
        self.file_size == 0
    }

    /// Formatted session start for display
    pub fn formatted_datetime(&self) -> String {
        self.started_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Default)]
pub struct DirectoryIndex {
    entries: HashMap<PathBuf, JournalFileMetaData>,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_index(dir: &Path) -> Result<Self, WatcherError> {
        let mut index = Self::new();

        let entries = fs::read_dir(dir).map_err(|source| WatcherError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if is_journal(&path) {
                index.add_file(&path);
            }
        }
        Ok(index)
    }

    pub fn create_entry(path: &Path) -> Option<JournalFileMetaData> {
        let filename = path.file_name()?.to_str()?.to_string();
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        let parsed = parse_journal_filename(&filename);

        Some(JournalFileMetaData {
            path: path.to_path_buf(),
            started_at: parsed.map(|(dt, _)| dt),
            part: parsed.map(|(_, part)| part),
            filename,
            file_size: metadata.len(),
        })
    }

    pub fn add_file(&mut self, path: &Path) -> Option<()> {
        let entry = Self::create_entry(path)?;
        self.entries.insert(entry.path.clone(), entry);
        Some(())
    }

    /// All entries, newest first (same order the locator uses)
    pub fn entries(&self) -> Vec<&JournalFileMetaData> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| b.filename.cmp(&a.filename));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get total size of all indexed files in bytes
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|e| e.file_size).sum()
    }
}

/// Parse the session start and part number out of a journal filename.
///
/// Handles `Journal.2025-01-01T101010.01.log` and the older
/// `Journal.250101101010.01.log` form.
pub fn parse_journal_filename(filename: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = filename
        .strip_prefix("Journal.")?
        .strip_suffix(JOURNAL_SUFFIX)?;
    let (stamp, part) = stem.rsplit_once('.')?;
    let part = part.parse().ok()?;

    let started_at = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H%M%S")
        .or_else(|_| NaiveDateTime::parse_from_str(stamp, "%y%m%d%H%M%S"))
        .ok()?;

    Some((started_at, part))
}
