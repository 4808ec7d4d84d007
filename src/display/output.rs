use crate::analysis::global_ranking::GlobalRankingEntry;
use crate::analysis::mvp::MvpReport;
use crate::store::{MatchSummary, StoredMatch};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Match")]
    match_id: String,
    kills: String,
    players: String,
    winner: String,
    weapon: String,
    awards: String,
}

#[derive(Tabled)]
struct FragRow {
    rank: String,
    player: String,
    frags: String,
    deaths: String,
    streak: String,
}

#[derive(Tabled)]
struct GlobalRow {
    rank: String,
    player: String,
    frags: String,
    deaths: String,
}

#[derive(Tabled)]
struct MvpRow {
    rank: String,
    player: String,
    score: String,
    awards: String,
}

#[derive(Tabled)]
struct StoredRow {
    #[tabled(rename = "#")]
    id: String,
    #[tabled(rename = "Match")]
    match_id: String,
    recorded: String,
}

fn print_header(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_ingested_matches(matches: &[StoredMatch]) {
    print_header(&format!("🎯 Processed {} match(es)", matches.len()));

    if matches.is_empty() {
        println!("{}", "No match start markers with a numeric id were found".yellow());
        return;
    }

    let rows = matches
        .iter()
        .map(|stored| {
            let report = &stored.report;
            let winner = report
                .ranking
                .first()
                .filter(|entry| entry.frags > 0)
                .map(|entry| entry.player.clone())
                .unwrap_or_else(|| "-".to_string());
            let awards = report
                .awards
                .iter()
                .map(|award| format!("{} ({})", award.award, award.player))
                .collect::<Vec<_>>()
                .join(", ");

            MatchRow {
                match_id: report.match_id.clone(),
                kills: report.total_kills.to_string(),
                players: report.players.len().to_string(),
                winner,
                weapon: report
                    .winner_favorite_weapon
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                awards,
            }
        })
        .collect();

    print_table::<MatchRow>(rows);
}

pub fn display_match_report(stored: &StoredMatch) {
    let report = &stored.report;
    print_header(&format!("🕹️  Match {}", report.match_id));

    println!(
        "{} {}   {} {}   {} {}\n",
        "Total kills:".bold(),
        report.total_kills,
        "Players:".bold(),
        report.players.len(),
        "Favorite weapon:".bold(),
        report.winner_favorite_weapon.as_deref().unwrap_or("-")
    );

    // Players that only died are listed after the ranked ones.
    let ranked = report.ranking.iter().map(|entry| (entry.player.as_str(), entry.frags));
    let unranked = report
        .players
        .iter()
        .filter(|player| !report.ranking.iter().any(|entry| &entry.player == *player))
        .map(|player| (player.as_str(), 0));

    let rows: Vec<FragRow> = ranked
        .chain(unranked)
        .enumerate()
        .map(|(idx, (player, frags))| {
            let frags = if frags < 0 {
                frags.to_string().red().to_string()
            } else {
                frags.to_string()
            };

            FragRow {
                rank: format!("#{}", idx + 1),
                player: player.to_string(),
                frags,
                deaths: report.deaths.get(player).copied().unwrap_or(0).to_string(),
                streak: report.highest_streaks.get(player).copied().unwrap_or(0).to_string(),
            }
        })
        .collect();

    print_table(rows);

    if report.awards.is_empty() {
        println!("{}\n", "No awards this match".yellow());
        return;
    }

    println!("{}", "Awards".bold().yellow());
    for award in &report.awards {
        println!("  🏆 {} {}", award.award.to_string().green(), award.player);
    }
    println!();
}

pub fn display_global_ranking(ranking: &[GlobalRankingEntry]) {
    print_header("🌍 GLOBAL RANKING");

    if ranking.is_empty() {
        println!("{}", "No matches stored yet".yellow());
        return;
    }

    let rows: Vec<GlobalRow> = ranking
        .iter()
        .enumerate()
        .map(|(idx, entry)| GlobalRow {
            rank: format!("#{}", idx + 1),
            player: entry.player.clone(),
            frags: entry.total_frags.to_string(),
            deaths: entry.total_deaths.to_string(),
        })
        .collect();

    print_table(rows);
}

pub fn display_mvp_report(report: &MvpReport) {
    print_header("👑 MVP REPORT");

    let champions = match report {
        MvpReport::Champions(champions) => champions,
        other => {
            println!("{}", other.message().unwrap_or_default().yellow());
            return;
        }
    };

    let rows: Vec<MvpRow> = champions
        .iter()
        .enumerate()
        .map(|(idx, entry)| MvpRow {
            rank: format!("#{}", idx + 1),
            player: entry.player.clone(),
            score: entry.score.to_string(),
            awards: entry
                .awards_summary
                .iter()
                .map(|(award, count)| format!("{} x{}", award, count))
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();

    print_table(rows);

    if let Some(mvp) = champions.first() {
        println!("{} {} with {} points\n", "MVP:".bold().red(), mvp.player.bold(), mvp.score);
    }
}

pub fn display_match_list(matches: &[MatchSummary]) {
    print_header(&format!("📜 STORED MATCHES ({})", matches.len()));

    if matches.is_empty() {
        println!("{}", "No matches stored yet".yellow());
        return;
    }

    let rows: Vec<StoredRow> = matches
        .iter()
        .map(|summary| StoredRow {
            id: summary.id.to_string(),
            match_id: summary.match_id.clone(),
            recorded: summary.recorded_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        })
        .collect();

    print_table(rows);
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
