use crate::analysis::match_stats::{AggregateReport, MatchRecord};
use crate::api::endpoints;
use crate::api::live_client::LiveClientStatus;
use crate::history::pipeline::{MatchReport, SkippedMatch};
use crate::history::riot_id::RiotId;
use chrono::Local;
use colored::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "#")]
    number: String,
    champion: String,
    #[tabled(rename = "K/D/A")]
    score: String,
    #[tabled(rename = "KDA")]
    kda: String,
    result: String,
    mode: String,
    role: String,
    played: String,
    duration: String,
    portrait: String,
}

/// Where each card's portrait can be found: a saved file, or the Data Dragon URL.
pub struct Portraits {
    pub version: String,
    pub saved: BTreeMap<String, PathBuf>,
}

impl Portraits {
    pub fn portrait_for(&self, champion_name: &str) -> String {
        match self.saved.get(champion_name) {
            Some(path) => path.display().to_string(),
            None => endpoints::champion_portrait(&self.version, champion_name),
        }
    }
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

pub fn display_no_history(riot_id: &RiotId) {
    display_info(&format!("No recent matches found for {}", riot_id));
}

pub fn display_report(report: &MatchReport, portraits: &Portraits) {
    println!(
        "\n{}",
        format!("📊 MATCH HISTORY for {} (last {} games)", report.riot_id, report.requested)
            .bold()
            .cyan()
    );
    println!("{}\n", "=".repeat(80).cyan());

    match &report.summary {
        Some(summary) => display_summary(summary),
        None => display_warning("No match details could be loaded"),
    }

    if !report.records.is_empty() {
        display_match_cards(&report.records, portraits);
    }

    if !report.skipped.is_empty() {
        display_skipped(&report.skipped);
    }
}

fn display_summary(summary: &AggregateReport) {
    println!(
        "{} {} W / {} L ({:.1}% WR)",
        "📈 Overall:".bold(),
        summary.wins.to_string().green(),
        summary.losses().to_string().red(),
        summary.win_rate_percent
    );
    println!("{} {:.2}", "⚔️  Average KDA:".bold(), summary.average_kda);
    println!("{} {}", "🏆 Most played:".bold(), format_top_champions(summary));
    println!(
        "{} {} ({} games)\n",
        "🧭 Main role:".bold(),
        summary.top_role.role.display_name(),
        summary.top_role.games
    );
}

fn format_top_champions(summary: &AggregateReport) -> String {
    summary
        .top_champions
        .iter()
        .map(|c| format!("{} x{}", c.champion_name, c.games))
        .collect::<Vec<_>>()
        .join("  ")
}

fn display_match_cards(records: &[MatchRecord], portraits: &Portraits) {
    let rows: Vec<MatchRow> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let result = if record.win {
                "WIN".green().to_string()
            } else {
                "LOSS".red().to_string()
            };

            MatchRow {
                number: format!("{}", idx + 1),
                champion: record.champion_name.clone(),
                score: format!("{}/{}/{}", record.kills, record.deaths, record.assists),
                kda: format!("{:.2}", record.kda()),
                result,
                mode: record.game_mode.clone(),
                role: record.role.display_name().to_string(),
                played: record
                    .played_at
                    .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                duration: format_duration(record.duration_secs),
                portrait: portraits.portrait_for(&record.champion_name),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

fn display_skipped(skipped: &[SkippedMatch]) {
    println!(
        "{}",
        format!("Skipped {} match(es):", skipped.len()).yellow()
    );
    for m in skipped {
        println!("  • {}: {}", m.match_id, m.reason);
    }
    println!();
}

pub fn display_live_status(status: &LiveClientStatus) {
    match status {
        LiveClientStatus::InGame {
            summoner_name,
            level,
        } => display_success(&format!("In game as {} (level {})", summoner_name, level)),
        LiveClientStatus::Loading { status } => display_info(&format!(
            "League client is running but no game data yet (HTTP {})",
            status
        )),
        LiveClientStatus::NotRunning => display_info("League client is not running"),
    }
}

fn format_duration(secs: i64) -> String {
    if secs <= 0 {
        return "-".to_string();
    }
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_render_as_minutes_and_seconds() {
        assert_eq!(format_duration(1845), "30:45");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(0), "-");
    }

    #[test]
    fn saved_portraits_win_over_urls() {
        let mut saved = BTreeMap::new();
        saved.insert("Ahri".to_string(), PathBuf::from("portraits/Ahri.png"));
        let portraits = Portraits {
            version: "14.13.1".to_string(),
            saved,
        };

        assert_eq!(portraits.portrait_for("Ahri"), "portraits/Ahri.png");
        assert_eq!(
            portraits.portrait_for("Zed"),
            "https://ddragon.leagueoflegends.com/cdn/14.13.1/img/champion/Zed.png"
        );
    }
}
