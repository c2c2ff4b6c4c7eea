use crate::context::{WatcherError, is_journal};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

/// Requests sent from background watchers to the foreground dashboard loop.
/// None of them carry pipeline data; each one only asks for a re-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The tracked journal's modification time changed
    JournalChanged(PathBuf),
    NewJournal(PathBuf),
    JournalRemoved(PathBuf),
    Message(String),
    Error(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Change Watcher (polling)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Watching,
    Triggered,
}

/// Polls one journal's modification time.
///
/// Owns nothing but its last-seen timestamp. A file missing at start counts
/// as the epoch; a file missing during a tick leaves the timestamp alone.
pub struct ChangeWatcher {
    path: PathBuf,
    interval: Duration,
    last_modified: SystemTime,
}

impl ChangeWatcher {
    pub fn new(path: PathBuf, interval: Duration) -> Self {
        let last_modified = Self::baseline(&path);
        Self::with_baseline(path, interval, last_modified)
    }

    /// Start from a timestamp taken earlier, e.g. just before the journal was
    /// read, so a write landing in between still triggers.
    pub fn with_baseline(path: PathBuf, interval: Duration, last_modified: SystemTime) -> Self {
        Self {
            path,
            interval,
            last_modified,
        }
    }

    /// Current modification time of `path`, or the epoch if it is unreadable.
    pub fn baseline(path: &Path) -> SystemTime {
        modified_time(path).unwrap_or(UNIX_EPOCH)
    }

    pub fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    /// One tick. On `Triggered` the new timestamp is already recorded, so the
    /// next tick is back to `Watching` unless the file changes again.
    pub fn poll(&mut self) -> WatchState {
        match modified_time(&self.path) {
            Ok(modified) if modified != self.last_modified => {
                self.last_modified = modified;
                WatchState::Triggered
            }
            Ok(_) => WatchState::Watching,
            Err(e) => {
                tracing::trace!(error = %e, "Tracked journal unavailable");
                WatchState::Watching
            }
        }
    }

    /// Poll until the receiving side goes away.
    pub async fn run(mut self, tx: Sender<DashboardEvent>) {
        tracing::debug!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis() as u64,
            "Change watcher started"
        );

        loop {
            sleep(self.interval).await;
            if self.poll() == WatchState::Triggered {
                tracing::debug!(path = %self.path.display(), "Journal changed");
                if tx
                    .send(DashboardEvent::JournalChanged(self.path.clone()))
                    .await
                    .is_err()
                {
                    break;
                }
            }
        }
    }

    pub fn spawn(self, tx: Sender<DashboardEvent>) -> JoinHandle<()> {
        tokio::spawn(self.run(tx))
    }
}

fn modified_time(path: &Path) -> Result<SystemTime, WatcherError> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| WatcherError::Metadata {
            path: path.to_path_buf(),
            source,
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Directory Watcher (notify)
// ─────────────────────────────────────────────────────────────────────────────

pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
}

impl DirectoryWatcher {
    pub fn new(path: &Path) -> Result<Self, WatcherError> {
        let (tx, rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.blocking_send(res);
            },
            Config::default(),
        )
        .map_err(WatcherError::InitWatcher)?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|source| WatcherError::WatchPath {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    pub async fn next_event(&mut self) -> Option<DashboardEvent> {
        while let Some(event_result) = self.rx.recv().await {
            match event_result {
                Ok(event) => {
                    if let Some(dashboard_event) = self.process_event(event).await {
                        return Some(dashboard_event);
                    }
                }
                Err(e) => {
                    return Some(DashboardEvent::Error(format!(
                        "Directory watcher error: {}",
                        e
                    )));
                }
            }
        }
        None
    }

    async fn process_event(&mut self, event: Event) -> Option<DashboardEvent> {
        match event.kind {
            EventKind::Create(_) => {
                for path in event.paths {
                    if is_journal(&path) {
                        return Some(self.handle_new_file(path).await);
                    }
                }
            }
            EventKind::Remove(_) => {
                for path in event.paths {
                    if is_journal(&path) {
                        return Some(DashboardEvent::JournalRemoved(path));
                    }
                }
            }
            // Content changes are the change watcher's job
            _ => {}
        }
        None
    }

    async fn handle_new_file(&self, path: PathBuf) -> DashboardEvent {
        const NEW_FILE_TIMEOUT: Duration = Duration::from_secs(10);
        const NEW_FILE_POLL_INTERVAL: Duration = Duration::from_millis(250);

        // The game creates the file before writing its header line
        let start = Instant::now();
        while start.elapsed() < NEW_FILE_TIMEOUT {
            if path.metadata().map(|m| m.len()).unwrap_or(0) > 0 {
                return DashboardEvent::NewJournal(path);
            }
            sleep(NEW_FILE_POLL_INTERVAL).await;
        }

        DashboardEvent::Message(format!(
            "Warning: Timed out waiting for content in {}",
            path.display()
        ))
    }

    /// Forward events into the dashboard channel until either side closes.
    pub async fn forward(mut self, tx: Sender<DashboardEvent>) {
        while let Some(event) = self.next_event().await {
            if tx.send(event).await.is_err() {
                break;
            }
        }
    }
}
