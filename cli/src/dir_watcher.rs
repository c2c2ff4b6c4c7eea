use crate::CliContext;
use crate::dashboard::render_live;
use missionboard_core::context::AppConfigExt;
use missionboard_core::{
    ChangeWatcher, Dashboard, DashboardEvent, DirectoryWatcher, latest_journals, run_pipeline,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc::{self, Receiver, Sender};

const EVENT_CHANNEL_SIZE: usize = 32;

struct LiveSettings {
    directory: PathBuf,
    journal_count: usize,
    interval: Duration,
    watch_new_journals: bool,
}

impl LiveSettings {
    async fn from_context(ctx: &CliContext) -> Self {
        let config = ctx.config.read().await;
        Self {
            directory: config.log_path(),
            journal_count: config.journal_count,
            interval: Duration::from_secs(config.poll_interval_secs),
            watch_new_journals: config.watch_new_journals,
        }
    }
}

/// Render, then re-render on every watcher request until Ctrl-C.
pub async fn run_live(ctx: &CliContext) -> Result<(), String> {
    let settings = LiveSettings::from_context(ctx).await;
    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_SIZE);

    if settings.watch_new_journals {
        start_directory_watcher(ctx, &settings.directory, tx.clone()).await;
    }

    let mut tracked = refresh(ctx, &settings, None, &tx).await?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = rx.recv() => {
                let Some(event) = event else { break };
                if needs_refresh(&event) | drain_pending(&mut rx) {
                    tracked = refresh(ctx, &settings, tracked, &tx).await?;
                }
            }
        }
    }

    ctx.tasks.lock().await.abort_all();
    tracing::debug!("Live dashboard stopped");
    Ok(())
}

fn needs_refresh(event: &DashboardEvent) -> bool {
    match event {
        DashboardEvent::JournalChanged(path) => {
            tracing::debug!(path = %path.display(), "Journal changed, refreshing");
            true
        }
        DashboardEvent::NewJournal(path) => {
            tracing::info!(path = %path.display(), "New journal detected");
            true
        }
        DashboardEvent::JournalRemoved(path) => {
            tracing::info!(path = %path.display(), "Journal removed");
            true
        }
        DashboardEvent::Message(msg) => {
            tracing::info!("{}", msg);
            false
        }
        DashboardEvent::Error(err) => {
            tracing::warn!("{}", err);
            false
        }
    }
}

/// Collapse a burst of queued requests into the one refresh about to happen.
fn drain_pending(rx: &mut Receiver<DashboardEvent>) -> bool {
    let mut refresh = false;
    while let Ok(event) = rx.try_recv() {
        refresh |= needs_refresh(&event);
    }
    refresh
}

/// Run the pipeline, redraw, and point the change watcher at the newest
/// journal if it moved. Returns the journal now being tracked.
async fn refresh(
    ctx: &CliContext,
    settings: &LiveSettings,
    tracked: Option<PathBuf>,
    tx: &Sender<DashboardEvent>,
) -> Result<Option<PathBuf>, String> {
    let snapshot = take_snapshot(&settings.directory);
    let dashboard = run_pipeline(&settings.directory, settings.journal_count);
    let newest = newest_journal(&dashboard);

    if newest != tracked {
        let mut tasks = ctx.tasks.lock().await;
        match &newest {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Tracking journal");
                let since = baseline_for(path, snapshot.as_ref());
                let watcher = ChangeWatcher::with_baseline(path.clone(), settings.interval, since);
                tasks.replace_change_watcher(watcher.spawn(tx.clone()));
            }
            None => {
                if let Some(handle) = tasks.change_watcher.take() {
                    handle.abort();
                }
            }
        }
    }

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render_live(&dashboard, newest.as_deref())).map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;

    Ok(newest)
}

/// Newest journal and its modification time, taken before the pipeline reads it.
fn take_snapshot(dir: &Path) -> Option<(PathBuf, SystemTime)> {
    let newest = latest_journals(dir, 1).into_iter().next()?;
    let modified = ChangeWatcher::baseline(&newest);
    Some((newest, modified))
}

/// A journal that appeared after the snapshot starts from the epoch, so its
/// first tick forces another refresh.
fn baseline_for(path: &Path, snapshot: Option<&(PathBuf, SystemTime)>) -> SystemTime {
    match snapshot {
        Some((snapped, modified)) if snapped == path => *modified,
        _ => UNIX_EPOCH,
    }
}

fn newest_journal(dashboard: &Dashboard) -> Option<PathBuf> {
    dashboard.newest_journal().map(Path::to_path_buf)
}

async fn start_directory_watcher(ctx: &CliContext, dir: &Path, tx: Sender<DashboardEvent>) {
    let watcher = match DirectoryWatcher::new(dir) {
        Ok(w) => w,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to start directory watcher");
            return;
        }
    };

    tracing::debug!(path = %dir.display(), "Watching journal directory");
    let handle = tokio::spawn(watcher.forward(tx));
    ctx.tasks.lock().await.directory_watcher = Some(handle);
}
