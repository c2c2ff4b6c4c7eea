use hashbrown::HashSet;
use std::path::Path;

use super::Mission;
use crate::journal::{JournalEvent, MissionId, read_events};

/// Single forward pass over journal events.
///
/// Redirects only suppress acceptances that come after them in scan order;
/// a mission already extracted stays in the list even if a redirect for it
/// shows up later in the same pass.
#[derive(Debug, Default)]
pub struct MissionExtractor {
    redirected: HashSet<MissionId>,
    missions: Vec<Mission>,
}

impl MissionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: JournalEvent) {
        match event {
            JournalEvent::MissionRedirected(redirect) => {
                self.redirected.insert(redirect.mission_id);
            }
            JournalEvent::MissionAccepted(accepted) => {
                if self.redirected.contains(&accepted.mission_id) {
                    tracing::trace!(mission_id = ?accepted.mission_id, "Skipping redirected mission");
                    return;
                }
                self.missions.push(Mission::from(accepted));
            }
            JournalEvent::Other => {}
        }
    }

    pub fn process_events(&mut self, events: impl IntoIterator<Item = JournalEvent>) {
        for event in events {
            self.process_event(event);
        }
    }

    pub fn into_missions(self) -> Vec<Mission> {
        self.missions
    }
}

/// Extract missions from journals in the order given (newest first as
/// returned by the locator). The redirect set spans every file.
pub fn extract_missions<P: AsRef<Path>>(journals: &[P]) -> Vec<Mission> {
    let mut extractor = MissionExtractor::new();

    for journal in journals {
        let path = journal.as_ref();
        let mut events = read_events(path);
        extractor.process_events(events.by_ref());

        if events.skipped() > 0 {
            tracing::debug!(
                path = %path.display(),
                skipped = events.skipped(),
                "Skipped undecodable journal lines"
            );
        }
    }

    extractor.into_missions()
}

/// Stable sort; missions without a parseable expiry come first.
pub fn sort_by_expiry(missions: &mut [Mission]) {
    missions.sort_by(|a, b| a.expiry_raw.cmp(&b.expiry_raw));
}
