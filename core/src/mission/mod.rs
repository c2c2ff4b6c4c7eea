//! Active mission extraction and per-faction statistics

mod extractor;
pub mod format;
mod report;

pub use extractor::{MissionExtractor, extract_missions, sort_by_expiry};
pub use report::{FactionStat, MissionReport};

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::journal::{MissionAccepted, MissionId};
use format::{credits_from_reward, format_credits, format_expiry, format_genre, parse_expiry};

pub const UNKNOWN: &str = "Unknown";
pub const NOT_APPLICABLE: &str = "N/A";

/// An accepted mission that had not been redirected when it was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mission {
    pub id: MissionId,
    pub genre: String,
    pub sponsor: String,
    pub title: String,
    pub target: String,
    pub destination: String,
    pub kill_count: u64,
    /// Whole credits; aggregation works on this, never on `payout`
    pub reward: u64,
    /// `reward` formatted for display
    pub payout: String,
    pub coop: Option<bool>,
    pub expiry: String,
    /// Sort key only
    pub expiry_raw: Option<NaiveDateTime>,
}

impl From<MissionAccepted> for Mission {
    fn from(event: MissionAccepted) -> Self {
        let reward = credits_from_reward(event.reward.unwrap_or_default());
        let expiry = event.expiry.as_deref();

        Self {
            id: event.mission_id,
            genre: event
                .name
                .as_deref()
                .map(format_genre)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            sponsor: event.faction.unwrap_or_else(|| UNKNOWN.to_string()),
            title: event.localised_name.unwrap_or_else(|| UNKNOWN.to_string()),
            target: event
                .target_faction
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            destination: event
                .destination_system
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
            kill_count: event.kill_count.unwrap_or_default(),
            reward,
            payout: format_credits(reward),
            coop: event.wing,
            expiry: format_expiry(expiry),
            expiry_raw: parse_expiry(expiry),
        }
    }
}
