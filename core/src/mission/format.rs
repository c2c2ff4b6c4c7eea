//! Display formatting for mission fields

use chrono::NaiveDateTime;

pub const CREDITS_SUFFIX: &str = "CR";
pub const NO_DEADLINE: &str = "No deadline";

const EXPIRY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format credits with thousands separators, e.g. `12,345 CR`
pub fn format_credits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{} {}", grouped, CREDITS_SUFFIX)
}

/// Journal rewards are whole credits in practice; anything else is rounded
/// and negatives clamp to zero.
pub fn credits_from_reward(reward: f64) -> u64 {
    if reward.is_finite() && reward > 0.0 {
        reward.round() as u64
    } else {
        0
    }
}

/// `2025-01-01T10:00:00Z` -> `2025-01-01     -     10:00:00`
pub fn format_expiry(expiry: Option<&str>) -> String {
    match expiry {
        None | Some("") => NO_DEADLINE.to_string(),
        Some(raw) => match raw.split_once('T') {
            Some((date, time)) => format!("{}     -     {}", date, time.replace('Z', "")),
            None => raw.to_string(),
        },
    }
}

/// Parse a journal expiry. Anything off-format is treated as no deadline.
pub fn parse_expiry(expiry: Option<&str>) -> Option<NaiveDateTime> {
    let raw = expiry.filter(|s| !s.is_empty())?;
    NaiveDateTime::parse_from_str(&raw.replace('Z', ""), EXPIRY_FORMAT).ok()
}

/// `Mission_MassacreWing` -> `Mission Massacre`
pub fn format_genre(name: &str) -> String {
    name.replace('_', " ").replace("Wing", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_credits() {
        assert_eq!(format_credits(0), "0 CR");
        assert_eq!(format_credits(999), "999 CR");
        assert_eq!(format_credits(1000), "1,000 CR");
        assert_eq!(format_credits(12_345), "12,345 CR");
        assert_eq!(format_credits(1_250_000), "1,250,000 CR");
    }

    #[test]
    fn test_credits_from_reward_rounds() {
        assert_eq!(credits_from_reward(5000.0), 5000);
        assert_eq!(credits_from_reward(1234.5), 1235);
        assert_eq!(credits_from_reward(1234.4), 1234);
        assert_eq!(credits_from_reward(-50.0), 0);
        assert_eq!(credits_from_reward(f64::NAN), 0);
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(
            format_expiry(Some("2025-01-01T10:00:00Z")),
            "2025-01-01     -     10:00:00"
        );
        assert_eq!(
            format_expiry(Some("2025-01-01T10:00:00")),
            "2025-01-01     -     10:00:00"
        );
        assert_eq!(format_expiry(None), "No deadline");
        assert_eq!(format_expiry(Some("")), "No deadline");
        assert_eq!(format_expiry(Some("soon")), "soon");
    }

    #[test]
    fn test_parse_expiry() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_expiry(Some("2025-01-02T09:00:00Z")), Some(expected));
        assert_eq!(parse_expiry(Some("2025-01-02T09:00:00")), Some(expected));
        assert_eq!(parse_expiry(Some("2025-01-02")), None);
        assert_eq!(parse_expiry(Some("")), None);
        assert_eq!(parse_expiry(None), None);
    }

    #[test]
    fn test_format_genre() {
        assert_eq!(format_genre("Mission_MassacreWing"), "Mission Massacre");
        assert_eq!(format_genre("Mission_Courier"), "Mission Courier");
        assert_eq!(format_genre("Mission_Collect_Wing"), "Mission Collect");
    }
}
