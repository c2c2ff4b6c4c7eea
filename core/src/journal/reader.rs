use crate::journal::{JournalEvent, ReaderError, parse_line};
use std::fs::File;
use std::io::{BufRead, BufReader, Split};
use std::path::{Path, PathBuf};

pub struct Reader {
    path: PathBuf,
}

impl Reader {
    pub fn from(file_path: PathBuf) -> Self {
        Reader { path: file_path }
    }

    /// Open the journal for a single forward pass.
    pub fn events(&self) -> Result<JournalEvents, ReaderError> {
        let file = File::open(&self.path).map_err(|source| ReaderError::OpenFile {
            path: self.path.clone(),
            source,
        })?;

        Ok(JournalEvents {
            path: self.path.clone(),
            lines: Some(BufReader::new(file).split(b'\n')),
            line_number: 0,
            skipped: 0,
        })
    }
}

/// Lazy, top-to-bottom sequence of decoded journal lines.
///
/// Undecodable lines are skipped. A read error mid-file (the game truncating
/// or rewriting the journal) ends the sequence early instead of failing.
pub struct JournalEvents {
    path: PathBuf,
    lines: Option<Split<BufReader<File>>>,
    line_number: u64,
    skipped: u64,
}

impl JournalEvents {
    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            lines: None,
            line_number: 0,
            skipped: 0,
        }
    }

    /// Non-blank lines dropped so far because they did not decode.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Iterator for JournalEvents {
    type Item = JournalEvent;

    fn next(&mut self) -> Option<JournalEvent> {
        loop {
            let bytes = match self.lines.as_mut()?.next()? {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::debug!(
                        path = %self.path.display(),
                        line = self.line_number,
                        error = %e,
                        "Journal read interrupted"
                    );
                    self.lines = None;
                    return None;
                }
            };
            self.line_number += 1;

            if let Some(event) = parse_line(&bytes) {
                return Some(event);
            }
            if !bytes.trim_ascii().is_empty() {
                self.skipped += 1;
                tracing::trace!(
                    path = %self.path.display(),
                    line = self.line_number,
                    "Skipping undecodable journal line"
                );
            }
        }
    }
}

/// Read a journal, treating a missing or unreadable file as empty.
pub fn read_events(path: &Path) -> JournalEvents {
    match Reader::from(path.to_path_buf()).events() {
        Ok(events) => events,
        Err(e) => {
            tracing::debug!(error = %e, "Journal unavailable, treating as empty");
            JournalEvents::empty(path.to_path_buf())
        }
    }
}
