use crate::analysis::awards::{calculate_awards, AwardEntry};
use crate::analysis::match_processor::{MatchProcessor, PlayerTeamMap};
use crate::analysis::ranking::{calculate_ranking, RankingEntry};
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Persisted summary of one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub total_kills: u32,
    pub players: Vec<String>,
    pub ranking: Vec<RankingEntry>,
    pub deaths: IndexMap<String, u32>,
    #[serde(rename = "highestStreaks", alias = "streaks", default)]
    pub highest_streaks: IndexMap<String, u32>,
    pub awards: Vec<AwardEntry>,
    pub winner_favorite_weapon: Option<String>,
}

/// Team label -> members, as written in the team configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamConfig(pub IndexMap<String, Vec<String>>);

impl TeamConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::TeamConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::TeamConfig(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Later teams win when a player is listed more than once.
    pub fn player_team_map(&self) -> PlayerTeamMap {
        let mut map = PlayerTeamMap::new();
        for (team, players) in &self.0 {
            for player in players {
                map.insert(player.clone(), team.clone());
            }
        }
        map
    }
}

pub fn build_match_report(match_id: &str, lines: &[String], player_teams: &PlayerTeamMap) -> MatchReport {
    let mut processor = MatchProcessor::new(player_teams);
    for line in lines {
        processor.process_line(line);
    }
    let state = processor.finish();

    let ranking = calculate_ranking(&state.kills);
    let awards = calculate_awards(&ranking, &state.deaths, &state.kill_timestamps);
    let winner_favorite_weapon = state.winner_favorite_weapon(&ranking);

    MatchReport {
        match_id: match_id.to_string(),
        total_kills: state.total_kills(),
        players: state.players.into_iter().collect(),
        ranking,
        deaths: state.deaths,
        highest_streaks: state.highest_streaks,
        awards,
        winner_favorite_weapon,
    }
}
