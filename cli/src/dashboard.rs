//! Terminal rendering of a pipeline run

use missionboard_core::{Dashboard, Mission, MissionReport, format_credits};
use std::fmt::Write;
use std::path::Path;

const TITLE: &str = "Elite Dangerous - Active Missions";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Left-aligned text table with columns sized to their widest cell.
struct Table<'a> {
    headers: &'a [&'a str],
    rows: Vec<Vec<String>>,
}

impl<'a> Table<'a> {
    fn new(headers: &'a [&'a str]) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn render(&self, out: &mut String) {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let headers: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_row(out, &headers, &widths);
        let rule = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(rule));
        for row in &self.rows {
            write_row(out, row, &widths);
        }
    }
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

fn coop_label(coop: Option<bool>) -> String {
    match coop {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => String::new(),
    }
}

fn mission_row(mission: &Mission) -> Vec<String> {
    vec![
        mission.id.as_ref().map(ToString::to_string).unwrap_or_default(),
        mission.genre.clone(),
        mission.sponsor.clone(),
        mission.title.clone(),
        mission.target.clone(),
        mission.destination.clone(),
        mission.kill_count.to_string(),
        mission.payout.clone(),
        coop_label(mission.coop),
        mission.expiry.clone(),
    ]
}

pub fn no_journals_message(directory: &Path) -> String {
    format!(
        "No journal files found in {}. Make sure the game has been launched at least once.",
        directory.display()
    )
}

fn render_report(out: &mut String, report: &MissionReport) {
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out);
    let _ = writeln!(out, "{} active missions found", report.mission_count());
    let _ = writeln!(out);

    let mut missions = Table::new(&[
        "MissionID",
        "Genre",
        "Sponsor",
        "Title",
        "Target",
        "Destination",
        "Kills",
        "Payout",
        "Coop",
        "Expiry",
    ]);
    for mission in &report.missions {
        missions.push(mission_row(mission));
    }
    missions.render(out);

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Estimated total payout: {}",
        report.formatted_total_payout()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Mission statistics");

    let _ = writeln!(out);
    let _ = writeln!(out, "Total kills by faction:");
    let mut kills = Table::new(&["Faction", "Total Kills"]);
    for (faction, total) in report.kills_by_faction() {
        kills.push(vec![faction.to_string(), total.to_string()]);
    }
    kills.render(out);

    let _ = writeln!(out);
    let _ = writeln!(out, "Missions by faction:");
    let mut counts = Table::new(&["Faction", "Missions"]);
    for (faction, count) in report.missions_by_faction() {
        counts.push(vec![faction.to_string(), count.to_string()]);
    }
    counts.render(out);

    let _ = writeln!(out);
    let _ = writeln!(out, "Total rewards by faction:");
    let mut payouts = Table::new(&["Faction", "Total Payout"]);
    for (faction, total) in report.payout_by_faction() {
        payouts.push(vec![faction.to_string(), format_credits(total)]);
    }
    payouts.render(out);
}

/// Full dashboard text. With no journals this is only the status message.
pub fn render(dashboard: &Dashboard) -> String {
    match dashboard {
        Dashboard::NoJournals { directory } => format!("{}\n", no_journals_message(directory)),
        Dashboard::Missions { report, .. } => {
            let mut out = String::new();
            render_report(&mut out, report);
            out
        }
    }
}

/// Redraw for live mode: clear, dashboard, footer.
pub fn render_live(dashboard: &Dashboard, tracked: Option<&Path>) -> String {
    let mut out = String::from(CLEAR_SCREEN);
    out.push_str(&render(dashboard));
    let _ = writeln!(out);
    if let Some(path) = tracked {
        let _ = writeln!(out, "Watching {}", path.display());
    }
    let _ = writeln!(
        out,
        "Updated {} (Ctrl-C to quit)",
        chrono::Local::now().format("%H:%M:%S")
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use missionboard_core::run_pipeline;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_render_no_journals_is_single_message() {
        let dir = TempDir::new().unwrap();
        let text = render(&run_pipeline(dir.path(), 3));

        assert_eq!(text.lines().count(), 1);
        assert!(text.contains(&dir.path().display().to_string()));
        assert!(!text.contains("Faction"));
    }

    #[test]
    fn test_render_report_tables() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Journal.2025-01-01T090000.01.log"),
            concat!(
                r#"{"event":"MissionAccepted","MissionID":1,"Reward":5000,"Faction":"Fed","KillCount":4,"Wing":true}"#,
                "\n",
                r#"{"event":"MissionAccepted","MissionID":2,"Reward":3000,"Faction":"Fed"}"#,
                "\n",
            ),
        )
        .unwrap();

        let text = render(&run_pipeline(dir.path(), 3));
        assert!(text.starts_with(TITLE));
        assert!(text.contains("2 active missions found"));
        assert!(text.contains("Estimated total payout: 8,000 CR"));
        assert!(text.contains("Total kills by faction:"));
        assert!(text.contains("Missions by faction:"));
        assert!(text.contains("Total rewards by faction:"));
        assert!(text.lines().any(|l| l == "Fed     | 8,000 CR"));
        assert!(text.lines().any(|l| l == "Fed     | 2"));
        assert!(text.lines().any(|l| l == "Fed     | 4"));
    }

    #[test]
    fn test_table_pads_to_widest_cell() {
        let mut table = Table::new(&["A", "Long header"]);
        table.push(vec!["wide cell".to_string(), "x".to_string()]);
        let mut out = String::new();
        table.render(&mut out);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "A         | Long header");
        assert_eq!(lines[1], "-".repeat(23));
        assert_eq!(lines[2], "wide cell | x");
    }

    #[test]
    fn test_coop_label() {
        assert_eq!(coop_label(Some(true)), "Yes");
        assert_eq!(coop_label(Some(false)), "No");
        assert_eq!(coop_label(None), "");
    }
}
