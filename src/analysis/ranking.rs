use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player: String,
    pub frags: i32,
}

/// Orders players by frags, highest first.
///
/// The sort is stable, so equal frags keep the order in which players were
/// first credited with a kill. Zero and negative scores stay in the list.
pub fn calculate_ranking(kills: &IndexMap<String, i32>) -> Vec<RankingEntry> {
    let mut ranking: Vec<RankingEntry> = kills
        .iter()
        .map(|(player, frags)| RankingEntry {
            player: player.clone(),
            frags: *frags,
        })
        .collect();

    ranking.sort_by(|a, b| b.frags.cmp(&a.frags));
    ranking
}
