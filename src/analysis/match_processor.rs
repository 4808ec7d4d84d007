use crate::analysis::ranking::RankingEntry;
use crate::parser::{parse_log_line, LogEvent};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Player name -> team label.
pub type PlayerTeamMap = HashMap<String, String>;

/// Final per-match state handed to the calculators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchState {
    pub kills: IndexMap<String, i32>,
    pub deaths: IndexMap<String, u32>,
    pub players: IndexSet<String>,
    pub highest_streaks: IndexMap<String, u32>,
    pub kill_timestamps: IndexMap<String, Vec<u32>>,
    pub kills_by_weapon: IndexMap<String, IndexMap<String, u32>>,
}

impl MatchState {
    /// Sum of positive kill counts; friendly-fire penalties never reduce it.
    pub fn total_kills(&self) -> u32 {
        self.kills
            .values()
            .filter(|kills| **kills > 0)
            .map(|kills| *kills as u32)
            .sum()
    }

    /// Most used weapon of the top ranked player. Ties go to the weapon
    /// that entered the tally first.
    pub fn winner_favorite_weapon(&self, ranking: &[RankingEntry]) -> Option<String> {
        let winner = ranking.first().filter(|entry| entry.frags > 0)?;
        let weapons = self.kills_by_weapon.get(&winner.player)?;

        let mut favorite: Option<(&String, u32)> = None;
        for (weapon, count) in weapons {
            match favorite {
                Some((_, best)) if *count <= best => {}
                _ => favorite = Some((weapon, *count)),
            }
        }

        favorite.map(|(weapon, _)| weapon.clone())
    }
}

/// Folds the events of a single match into `MatchState`.
///
/// One processor per match; it is consumed by `finish`.
pub struct MatchProcessor<'a> {
    player_teams: &'a PlayerTeamMap,
    current_streaks: HashMap<String, u32>,
    state: MatchState,
}

impl<'a> MatchProcessor<'a> {
    pub fn new(player_teams: &'a PlayerTeamMap) -> Self {
        MatchProcessor {
            player_teams,
            current_streaks: HashMap::new(),
            state: MatchState::default(),
        }
    }

    pub fn process_line(&mut self, line: &str) {
        if let Some(event) = parse_log_line(line) {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: LogEvent) {
        match event {
            LogEvent::PlayerKill {
                time,
                killer,
                victim,
                weapon,
            } => self.player_kill(time, killer, victim, weapon),
            LogEvent::WorldKill { victim, .. } => self.world_kill(victim),
        }
    }

    pub fn finish(self) -> MatchState {
        self.state
    }

    fn is_friendly_fire(&self, killer: &str, victim: &str) -> bool {
        match (self.player_teams.get(killer), self.player_teams.get(victim)) {
            (Some(killer_team), Some(victim_team)) => {
                !killer_team.is_empty() && killer_team == victim_team
            }
            _ => false,
        }
    }

    fn player_kill(&mut self, time: u32, killer: String, victim: String, weapon: String) {
        let friendly_fire = self.is_friendly_fire(&killer, &victim);
        let state = &mut self.state;

        state.players.insert(killer.clone());
        state.players.insert(victim.clone());

        let kills = state.kills.entry(killer.clone()).or_insert(0);
        if friendly_fire {
            *kills -= 1;
        } else {
            *kills += 1;
            *state
                .kills_by_weapon
                .entry(killer.clone())
                .or_default()
                .entry(weapon)
                .or_insert(0) += 1;
        }

        *state.deaths.entry(victim.clone()).or_insert(0) += 1;

        let streak = self.current_streaks.entry(killer.clone()).or_insert(0);
        *streak += 1;
        let highest = state.highest_streaks.entry(killer.clone()).or_insert(0);
        *highest = (*highest).max(*streak);
        self.current_streaks.insert(victim, 0);

        state.kill_timestamps.entry(killer).or_default().push(time);
    }

    fn world_kill(&mut self, victim: String) {
        self.state.players.insert(victim.clone());
        *self.state.deaths.entry(victim.clone()).or_insert(0) += 1;
        self.current_streaks.insert(victim, 0);
    }
}
