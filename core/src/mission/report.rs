use hashbrown::HashMap;
use serde::Serialize;

use super::{Mission, sort_by_expiry};
use super::format::format_credits;

/// Per-sponsor totals, keyed uniquely by faction name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactionStat {
    pub faction: String,
    pub mission_count: usize,
    pub total_kills: u64,
    pub total_payout: u64,
}

impl FactionStat {
    fn new(faction: &str) -> Self {
        Self {
            faction: faction.to_string(),
            mission_count: 0,
            total_kills: 0,
            total_payout: 0,
        }
    }

    pub fn formatted_payout(&self) -> String {
        format_credits(self.total_payout)
    }
}

/// Everything the dashboard shows for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionReport {
    /// Sorted by expiry
    pub missions: Vec<Mission>,
    /// Sorted by faction name
    pub factions: Vec<FactionStat>,
    pub total_payout: u64,
}

impl MissionReport {
    pub fn new(mut missions: Vec<Mission>) -> Self {
        sort_by_expiry(&mut missions);

        let mut by_faction: HashMap<&str, FactionStat> = HashMap::new();
        let mut total_payout = 0u64;

        for mission in &missions {
            let stat = by_faction
                .entry(mission.sponsor.as_str())
                .or_insert_with(|| FactionStat::new(&mission.sponsor));
            stat.mission_count += 1;
            stat.total_kills += mission.kill_count;
            stat.total_payout += mission.reward;
            total_payout += mission.reward;
        }

        let mut factions: Vec<FactionStat> = by_faction.into_values().collect();
        factions.sort_by(|a, b| a.faction.cmp(&b.faction));

        Self {
            missions,
            factions,
            total_payout,
        }
    }

    pub fn mission_count(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn formatted_total_payout(&self) -> String {
        format_credits(self.total_payout)
    }

    pub fn faction(&self, name: &str) -> Option<&FactionStat> {
        self.factions.iter().find(|f| f.faction == name)
    }

    /// Kill totals, alphabetical by faction
    pub fn kills_by_faction(&self) -> Vec<(&str, u64)> {
        self.factions
            .iter()
            .map(|f| (f.faction.as_str(), f.total_kills))
            .collect()
    }

    /// Mission counts, busiest faction first
    pub fn missions_by_faction(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<_> = self
            .factions
            .iter()
            .map(|f| (f.faction.as_str(), f.mission_count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }

    /// Payout totals, alphabetical by faction
    pub fn payout_by_faction(&self) -> Vec<(&str, u64)> {
        self.factions
            .iter()
            .map(|f| (f.faction.as_str(), f.total_payout))
            .collect()
    }
}
