use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque journal `MissionID`.
///
/// Kept as the raw JSON value so ids of any type still match on redirect.
/// `9` and `"9"` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MissionKey(Value);

impl Hash for MissionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_string().hash(state);
    }
}

impl fmt::Display for MissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<u64> for MissionKey {
    fn from(id: u64) -> Self {
        Self(Value::from(id))
    }
}

impl From<&str> for MissionKey {
    fn from(id: &str) -> Self {
        Self(Value::from(id))
    }
}

/// Absent (or null) ids are kept as `None` so an id-less redirect still
/// matches an id-less acceptance.
pub type MissionId = Option<MissionKey>;

/// One decoded journal line.
///
/// Only the mission events are modelled; every other `event` value decodes to
/// [`JournalEvent::Other`] and is ignored downstream. A line without an `event`
/// key does not decode at all. Inside a mission event a field of the wrong
/// type reads as absent instead of rejecting the line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event")]
pub enum JournalEvent {
    MissionAccepted(MissionAccepted),
    MissionRedirected(MissionRedirected),
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MissionAccepted {
    #[serde(rename = "MissionID", default, deserialize_with = "mission_key")]
    pub mission_id: MissionId,
    /// Internal mission name, e.g. `Mission_MassacreWing`
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub faction: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub localised_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub target_faction: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub destination_system: Option<String>,
    #[serde(default, deserialize_with = "whole_count")]
    pub kill_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub reward: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub wing: Option<bool>,
    /// ISO-8601 without offset, usually with a trailing `Z`
    #[serde(default, deserialize_with = "lenient")]
    pub expiry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MissionRedirected {
    #[serde(rename = "MissionID", default, deserialize_with = "mission_key")]
    pub mission_id: MissionId,
}

fn mission_key<'de, D: Deserializer<'de>>(deserializer: D) -> Result<MissionId, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(MissionKey(value)),
    })
}

/// Any value decodes; one that does not fit `T` becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Kill counts written as floats (`12.0`) are rounded; negatives read as absent.
fn whole_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    }))
}

/// Decode a single journal line. Blank or malformed lines yield `None`.
pub fn parse_line(line: &[u8]) -> Option<JournalEvent> {
    let line = line.trim_ascii();
    if line.is_empty() {
        return None;
    }
    serde_json::from_slice(line).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_full() {
        let line = br#"{ "timestamp":"2025-01-01T09:00:00Z", "event":"MissionAccepted", "Faction":"Federal Navy", "Name":"Mission_MassacreWing", "LocalisedName":"Kill pirates", "TargetFaction":"Pirates", "DestinationSystem":"Sol", "KillCount":24, "Reward":1250000, "Wing":true, "Expiry":"2025-01-02T09:00:00Z", "MissionID":987654321 }"#;
        let Some(JournalEvent::MissionAccepted(accepted)) = parse_line(line) else {
            panic!("expected MissionAccepted");
        };
        assert_eq!(accepted.mission_id, Some(MissionKey::from(987654321)));
        assert_eq!(accepted.faction.as_deref(), Some("Federal Navy"));
        assert_eq!(accepted.name.as_deref(), Some("Mission_MassacreWing"));
        assert_eq!(accepted.kill_count, Some(24));
        assert_eq!(accepted.reward, Some(1_250_000.0));
        assert_eq!(accepted.wing, Some(true));
        assert_eq!(accepted.expiry.as_deref(), Some("2025-01-02T09:00:00Z"));
    }

    #[test]
    fn test_parse_accepted_sparse() {
        let line = br#"{"event":"MissionAccepted","MissionID":1}"#;
        let Some(JournalEvent::MissionAccepted(accepted)) = parse_line(line) else {
            panic!("expected MissionAccepted");
        };
        assert_eq!(accepted.mission_id, Some(MissionKey::from(1)));
        assert_eq!(accepted.faction, None);
        assert_eq!(accepted.reward, None);
    }

    #[test]
    fn test_parse_redirected() {
        let line = br#"{"event":"MissionRedirected","MissionID":5,"NewDestinationSystem":"Sol"}"#;
        assert_eq!(
            parse_line(line),
            Some(JournalEvent::MissionRedirected(MissionRedirected {
                mission_id: Some(MissionKey::from(5))
            }))
        );
    }

    #[test]
    fn test_parse_unrelated_event() {
        let line = br#"{"event":"FSDJump","StarSystem":"Sol"}"#;
        assert_eq!(parse_line(line), Some(JournalEvent::Other));
    }

    #[test]
    fn test_parse_rejects_missing_discriminator() {
        assert_eq!(parse_line(br#"{"MissionID":5}"#), None);
    }

    #[test]
    fn test_parse_rejects_truncated_line() {
        assert_eq!(parse_line(br#"{"event":"MissionAccepted","Miss"#), None);
        assert_eq!(parse_line(b""), None);
        assert_eq!(parse_line(b"   \r"), None);
    }

    #[test]
    fn test_parse_tolerates_crlf() {
        let line = b"{\"event\":\"MissionRedirected\",\"MissionID\":7}\r";
        assert!(matches!(
            parse_line(line),
            Some(JournalEvent::MissionRedirected(_))
        ));
    }

    #[test]
    fn test_parse_keeps_line_with_mistyped_fields() {
        let line = br#"{"event":"MissionAccepted","MissionID":3,"Faction":7,"Wing":1,"Reward":"lots","KillCount":12.0}"#;
        let Some(JournalEvent::MissionAccepted(accepted)) = parse_line(line) else {
            panic!("expected MissionAccepted");
        };
        assert_eq!(accepted.mission_id, Some(MissionKey::from(3)));
        assert_eq!(accepted.faction, None);
        assert_eq!(accepted.wing, None);
        assert_eq!(accepted.reward, None);
        assert_eq!(accepted.kill_count, Some(12));
    }

    #[test]
    fn test_parse_opaque_mission_ids() {
        let line = br#"{"event":"MissionRedirected","MissionID":"9"}"#;
        let Some(JournalEvent::MissionRedirected(redirect)) = parse_line(line) else {
            panic!("expected MissionRedirected");
        };
        assert_eq!(redirect.mission_id, Some(MissionKey::from("9")));
        assert_ne!(redirect.mission_id, Some(MissionKey::from(9)));

        let line = br#"{"event":"MissionRedirected","MissionID":null}"#;
        assert_eq!(
            parse_line(line),
            Some(JournalEvent::MissionRedirected(MissionRedirected { mission_id: None }))
        );
    }

    #[test]
    fn test_mission_key_display() {
        assert_eq!(MissionKey::from(42).to_string(), "42");
        assert_eq!(MissionKey::from("abc").to_string(), "abc");
    }
}
