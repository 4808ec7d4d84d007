use crate::analysis::ranking::RankingEntry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

const SPREE_KILLS: usize = 5;
const SPREE_WINDOW_SECS: u32 = 60;

/// Award kinds. Names read back from storage that this build does not know
/// are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Award {
    FlawlessVictory,
    KillingSpree,
    Other(String),
}

impl Award {
    pub fn as_str(&self) -> &str {
        match self {
            Award::FlawlessVictory => "FLAWLESS_VICTORY",
            Award::KillingSpree => "KILLING_SPREE",
            Award::Other(name) => name,
        }
    }

    /// MVP score weight.
    pub fn points(&self) -> u32 {
        match self {
            Award::FlawlessVictory => 5,
            Award::KillingSpree => 3,
            Award::Other(_) => 1,
        }
    }
}

impl From<String> for Award {
    fn from(name: String) -> Self {
        match name.as_str() {
            "FLAWLESS_VICTORY" => Award::FlawlessVictory,
            "KILLING_SPREE" => Award::KillingSpree,
            _ => Award::Other(name),
        }
    }
}

impl From<Award> for String {
    fn from(award: Award) -> Self {
        match award {
            Award::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Award {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardEntry {
    pub player: String,
    pub award: Award,
}

impl AwardEntry {
    fn new(player: &str, award: Award) -> Self {
        AwardEntry {
            player: player.to_string(),
            award,
        }
    }
}

pub fn calculate_awards(
    ranking: &[RankingEntry],
    deaths: &IndexMap<String, u32>,
    kill_timestamps: &IndexMap<String, Vec<u32>>,
) -> Vec<AwardEntry> {
    let mut awards = flawless_victories(ranking, deaths);

    awards.extend(
        kill_timestamps
            .iter()
            .filter(|(_, times)| has_killing_spree(times))
            .map(|(player, _)| AwardEntry::new(player, Award::KillingSpree)),
    );

    awards
}

/// Every player sharing the top score with no recorded death.
fn flawless_victories(ranking: &[RankingEntry], deaths: &IndexMap<String, u32>) -> Vec<AwardEntry> {
    let top_score = match ranking.first() {
        Some(top) if top.frags > 0 => top.frags,
        _ => return Vec::new(),
    };

    ranking
        .iter()
        .filter(|entry| entry.frags == top_score)
        .filter(|entry| deaths.get(&entry.player).copied().unwrap_or(0) == 0)
        .map(|entry| AwardEntry::new(&entry.player, Award::FlawlessVictory))
        .collect()
}

/// Five kills whose first and last fall less than a minute apart.
pub fn has_killing_spree(timestamps: &[u32]) -> bool {
    if timestamps.len() < SPREE_KILLS {
        return false;
    }

    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();
    sorted
        .windows(SPREE_KILLS)
        .any(|window| window[SPREE_KILLS - 1] - window[0] < SPREE_WINDOW_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranking(entries: &[(&str, i32)]) -> Vec<RankingEntry> {
        entries
            .iter()
            .map(|(player, frags)| RankingEntry {
                player: player.to_string(),
                frags: *frags,
            })
            .collect()
    }

    fn counts(entries: &[(&str, u32)]) -> IndexMap<String, u32> {
        entries.iter().map(|(p, n)| (p.to_string(), *n)).collect()
    }

    fn timestamps(entries: &[(&str, Vec<u32>)]) -> IndexMap<String, Vec<u32>> {
        entries.iter().map(|(p, t)| (p.to_string(), t.clone())).collect()
    }

    #[test]
    fn flawless_only_for_tied_leader_without_deaths() {
        let awards = calculate_awards(
            &ranking(&[("Roman", 3), ("Nick", 3), ("Marcus", 1)]),
            &counts(&[("Nick", 1), ("Marcus", 2)]),
            &IndexMap::new(),
        );

        assert_eq!(awards, vec![AwardEntry::new("Roman", Award::FlawlessVictory)]);
    }

    #[test]
    fn every_deathless_tied_leader_is_flawless() {
        let awards = calculate_awards(
            &ranking(&[("Roman", 2), ("Nick", 2)]),
            &counts(&[("Nick", 0)]),
            &IndexMap::new(),
        );

        assert_eq!(awards.len(), 2);
        assert!(awards.iter().all(|a| a.award == Award::FlawlessVictory));
    }

    #[test]
    fn no_flawless_when_top_score_not_positive() {
        let awards = calculate_awards(&ranking(&[("Roman", 0), ("Nick", -1)]), &IndexMap::new(), &IndexMap::new());

        assert!(awards.is_empty());
        assert!(calculate_awards(&[], &IndexMap::new(), &IndexMap::new()).is_empty());
    }

    #[test]
    fn spree_within_window() {
        assert!(has_killing_spree(&[0, 10, 20, 30, 40]));
        assert!(has_killing_spree(&[40, 0, 30, 10, 20]), "timestamps are sorted first");
        assert!(has_killing_spree(&[0, 100, 110, 120, 130, 159]));
    }

    #[test]
    fn spree_boundary_is_strict() {
        assert!(!has_killing_spree(&[0, 15, 30, 45, 60]));
        assert!(!has_killing_spree(&[0, 10, 20, 30]));
        assert!(!has_killing_spree(&[]));
    }

    #[test]
    fn spree_awarded_once_per_player() {
        let awards = calculate_awards(
            &ranking(&[("Roman", 10)]),
            &counts(&[("Roman", 1)]),
            &timestamps(&[("Roman", (0..10).collect()), ("Nick", vec![0, 100, 200, 300, 400])]),
        );

        assert_eq!(awards, vec![AwardEntry::new("Roman", Award::KillingSpree)]);
    }

    #[test]
    fn player_can_win_both_awards() {
        let awards = calculate_awards(
            &ranking(&[("Roman", 5)]),
            &IndexMap::new(),
            &timestamps(&[("Roman", vec![0, 10, 20, 30, 40])]),
        );

        assert_eq!(awards.len(), 2);
        assert!(awards.contains(&AwardEntry::new("Roman", Award::FlawlessVictory)));
        assert!(awards.contains(&AwardEntry::new("Roman", Award::KillingSpree)));
    }

    #[test]
    fn award_names_round_trip_through_json() {
        let entry: AwardEntry = serde_json::from_str(r#"{"player":"Nick","award":"HEADHUNTER"}"#).unwrap();
        assert_eq!(entry.award, Award::Other("HEADHUNTER".to_string()));
        assert_eq!(entry.award.points(), 1);

        let json = serde_json::to_string(&AwardEntry::new("Roman", Award::FlawlessVictory)).unwrap();
        assert_eq!(json, r#"{"player":"Roman","award":"FLAWLESS_VICTORY"}"#);
    }
}
