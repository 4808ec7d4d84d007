use crate::analysis::report::MatchReport;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub const NO_MATCHES_MESSAGE: &str = "No matches found to build the MVP report.";
pub const NO_MVP_MESSAGE: &str = "Could not determine a clear MVP (no player received awards).";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MvpEntry {
    pub player: String,
    pub score: u32,
    pub awards_summary: IndexMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MvpReport {
    Champions(Vec<MvpEntry>),
    NoMatches,
    NoQualifyingMvp,
}

impl MvpReport {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            MvpReport::Champions(_) => None,
            MvpReport::NoMatches => Some(NO_MATCHES_MESSAGE),
            MvpReport::NoQualifyingMvp => Some(NO_MVP_MESSAGE),
        }
    }
}

/// Champions serialise as a bare list, the two sentinels as `{"message": ...}`.
impl Serialize for MvpReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let message = match self {
            MvpReport::Champions(entries) => return entries.serialize(serializer),
            MvpReport::NoMatches => NO_MATCHES_MESSAGE,
            MvpReport::NoQualifyingMvp => NO_MVP_MESSAGE,
        };

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("message", message)?;
        map.end()
    }
}

pub fn aggregate_mvp_report(reports: &[MatchReport]) -> MvpReport {
    if reports.is_empty() {
        return MvpReport::NoMatches;
    }

    let mut champions: IndexMap<&str, MvpEntry> = IndexMap::new();
    for award in reports.iter().flat_map(|report| &report.awards) {
        let entry = champions
            .entry(award.player.as_str())
            .or_insert_with(|| MvpEntry {
                player: award.player.clone(),
                score: 0,
                awards_summary: IndexMap::new(),
            });

        entry.score += award.award.points();
        *entry
            .awards_summary
            .entry(award.award.to_string())
            .or_insert(0) += 1;
    }

    if champions.is_empty() {
        return MvpReport::NoQualifyingMvp;
    }

    let mut ranking: Vec<MvpEntry> = champions.into_values().collect();
    ranking.sort_by(|a, b| b.score.cmp(&a.score));
    MvpReport::Champions(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::awards::{Award, AwardEntry};
    use serde_json::json;

    fn report(match_id: &str, awards: &[(&str, Award)]) -> MatchReport {
        MatchReport {
            match_id: match_id.to_string(),
            total_kills: 0,
            players: Vec::new(),
            ranking: Vec::new(),
            deaths: IndexMap::new(),
            highest_streaks: IndexMap::new(),
            awards: awards
                .iter()
                .map(|(player, award)| AwardEntry {
                    player: player.to_string(),
                    award: award.clone(),
                })
                .collect(),
            winner_favorite_weapon: None,
        }
    }

    #[test]
    fn scores_and_counts_awards() {
        let reports = vec![
            report("1", &[("Nick", Award::KillingSpree), ("Roman", Award::FlawlessVictory)]),
            report("2", &[("Nick", Award::KillingSpree), ("Nick", Award::Other("HEADSHOT".to_string()))]),
            report("3", &[]),
        ];

        let MvpReport::Champions(ranking) = aggregate_mvp_report(&reports) else {
            panic!("expected champions");
        };

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].player, "Nick");
        assert_eq!(ranking[0].score, 7);
        assert_eq!(ranking[0].awards_summary["KILLING_SPREE"], 2);
        assert_eq!(ranking[0].awards_summary["HEADSHOT"], 1);
        assert_eq!(ranking[1].player, "Roman");
        assert_eq!(ranking[1].score, 5);
    }

    #[test]
    fn empty_input_is_no_matches() {
        let report = aggregate_mvp_report(&[]);

        assert_eq!(report, MvpReport::NoMatches);
        assert_eq!(serde_json::to_value(&report).unwrap(), json!({ "message": NO_MATCHES_MESSAGE }));
    }

    #[test]
    fn matches_without_awards_have_no_mvp() {
        let report = aggregate_mvp_report(&[report("1", &[]), report("2", &[])]);

        assert_eq!(report, MvpReport::NoQualifyingMvp);
        assert_ne!(report.message(), MvpReport::NoMatches.message());
        assert_eq!(serde_json::to_value(&report).unwrap(), json!({ "message": NO_MVP_MESSAGE }));
    }

    #[test]
    fn champions_serialise_as_list() {
        let report = aggregate_mvp_report(&[report("1", &[("Roman", Award::FlawlessVictory)])]);

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!([{ "player": "Roman", "score": 5, "awards_summary": { "FLAWLESS_VICTORY": 1 } }])
        );
    }
}
