//! Locator → parser → extractor → aggregator, run from scratch every time.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::context::latest_journals;
use crate::mission::{MissionReport, extract_missions};

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Dashboard {
    /// No `Journal*.log` in the directory (or no directory at all)
    NoJournals { directory: PathBuf },
    Missions {
        /// Newest first, as scanned
        journals: Vec<PathBuf>,
        report: MissionReport,
    },
}

impl Dashboard {
    pub fn report(&self) -> Option<&MissionReport> {
        match self {
            Dashboard::Missions { report, .. } => Some(report),
            Dashboard::NoJournals { .. } => None,
        }
    }

    /// The file the change watcher should track
    pub fn newest_journal(&self) -> Option<&Path> {
        match self {
            Dashboard::Missions { journals, .. } => journals.first().map(PathBuf::as_path),
            Dashboard::NoJournals { .. } => None,
        }
    }
}

pub fn run_pipeline(directory: &Path, journal_count: usize) -> Dashboard {
    let timer = Instant::now();

    let journals = latest_journals(directory, journal_count);
    if journals.is_empty() {
        tracing::info!(path = %directory.display(), "No journal files found");
        return Dashboard::NoJournals {
            directory: directory.to_path_buf(),
        };
    }

    let report = MissionReport::new(extract_missions(&journals));

    tracing::debug!(
        journals = journals.len(),
        missions = report.mission_count(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Pipeline run complete"
    );

    Dashboard::Missions { journals, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_journals_names_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Status.json"), "{}").unwrap();

        let dashboard = run_pipeline(dir.path(), 3);
        assert_eq!(
            dashboard,
            Dashboard::NoJournals {
                directory: dir.path().to_path_buf()
            }
        );
        assert!(dashboard.report().is_none());
        assert!(dashboard.newest_journal().is_none());
    }

    #[test]
    fn test_missing_directory_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("Elite Dangerous");
        assert!(matches!(
            run_pipeline(&missing, 3),
            Dashboard::NoJournals { .. }
        ));
    }

    #[test]
    fn test_pipeline_reads_only_newest_journals() {
        let dir = TempDir::new().unwrap();
        let accept = |id: u32| {
            format!(r#"{{"event":"MissionAccepted","MissionID":{id},"Reward":1000,"Faction":"Fed"}}"#)
        };
        fs::write(dir.path().join("Journal.2025-01-01T090000.01.log"), accept(1)).unwrap();
        fs::write(dir.path().join("Journal.2025-01-02T090000.01.log"), accept(2)).unwrap();
        fs::write(dir.path().join("Journal.2025-01-03T090000.01.log"), accept(3)).unwrap();

        let dashboard = run_pipeline(dir.path(), 2);
        let report = dashboard.report().unwrap();
        let mut ids: Vec<_> = report
            .missions
            .iter()
            .filter_map(|m| m.id.as_ref().map(ToString::to_string))
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(
            dashboard.newest_journal(),
            Some(dir.path().join("Journal.2025-01-03T090000.01.log").as_path())
        );
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Journal.2025-01-01T090000.01.log"),
            concat!(
                r#"{"event":"MissionAccepted","MissionID":1,"Reward":5000,"Faction":"Fed"}"#,
                "\n",
                r#"{"event":"MissionAccepted","MissionID":2,"Reward":3000,"Faction":"Fed"}"#,
                "\n",
            ),
        )
        .unwrap();

        assert_eq!(run_pipeline(dir.path(), 3), run_pipeline(dir.path(), 3));
    }

    #[test]
    fn test_dashboard_serializes_with_status() {
        let dir = TempDir::new().unwrap();
        let json = serde_json::to_value(run_pipeline(dir.path(), 3)).unwrap();
        assert_eq!(json["status"], "no_journals");
    }
}
