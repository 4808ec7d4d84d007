use crate::analysis::report::MatchReport;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalRankingEntry {
    pub player: String,
    pub total_frags: i64,
    pub total_deaths: u64,
}

/// Per-player totals across matches, most frags first.
///
/// Negative match scores add nothing to `total_frags`; deaths always count.
pub fn aggregate_global_ranking(reports: &[MatchReport]) -> Vec<GlobalRankingEntry> {
    let mut totals: IndexMap<&str, (i64, u64)> = IndexMap::new();

    for report in reports {
        for entry in &report.ranking {
            let (frags, _) = totals.entry(entry.player.as_str()).or_default();
            if entry.frags > 0 {
                *frags += i64::from(entry.frags);
            }
        }

        for (player, count) in &report.deaths {
            let (_, deaths) = totals.entry(player.as_str()).or_default();
            *deaths += u64::from(*count);
        }
    }

    let mut ranking: Vec<GlobalRankingEntry> = totals
        .into_iter()
        .map(|(player, (total_frags, total_deaths))| GlobalRankingEntry {
            player: player.to_string(),
            total_frags,
            total_deaths,
        })
        .collect();

    ranking.sort_by(|a, b| b.total_frags.cmp(&a.total_frags));
    ranking
}
