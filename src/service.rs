use crate::analysis::global_ranking::{aggregate_global_ranking, GlobalRankingEntry};
use crate::analysis::mvp::{aggregate_mvp_report, MvpReport};
use crate::analysis::report::{build_match_report, MatchReport, TeamConfig};
use crate::error::AppError;
use crate::parser::{split_log_into_match_chunks, MatchChunk};
use crate::store::{MatchRepository, MatchSummary, StoredMatch};

/// Turns raw server logs into stored match reports and serves aggregates
/// over everything stored so far.
pub struct LogService<R: MatchRepository> {
    repository: R,
}

impl<R: MatchRepository> LogService<R> {
    pub fn new(repository: R) -> Self {
        LogService { repository }
    }

    /// Builds one report per identifiable match and saves them in one batch.
    ///
    /// `on_report` is called after each report is built.
    pub fn process_and_save_log<F>(
        &mut self,
        content: &str,
        teams: Option<&TeamConfig>,
        on_report: F,
    ) -> Result<Vec<StoredMatch>, AppError>
    where
        F: FnMut(&MatchReport),
    {
        let chunks = split_log_into_match_chunks(content);
        let reports = build_reports(&chunks, teams, on_report);

        if reports.is_empty() {
            tracing::debug!(chunks = chunks.len(), "log contained no identifiable matches");
            return Ok(Vec::new());
        }

        self.repository.save(reports)
    }

    pub fn global_ranking(&self) -> Result<Vec<GlobalRankingEntry>, AppError> {
        Ok(aggregate_global_ranking(&self.all_reports()?))
    }

    pub fn mvp_report(&self) -> Result<MvpReport, AppError> {
        Ok(aggregate_mvp_report(&self.all_reports()?))
    }

    pub fn matches_summary(&self) -> Result<Vec<MatchSummary>, AppError> {
        let matches = self.repository.fetch_all()?;
        Ok(matches.iter().map(MatchSummary::from).collect())
    }

    pub fn match_by_id(&self, match_id: &str) -> Result<Option<StoredMatch>, AppError> {
        self.repository.fetch_by_match_id(match_id)
    }

    fn all_reports(&self) -> Result<Vec<MatchReport>, AppError> {
        let matches = self.repository.fetch_all()?;
        Ok(matches.into_iter().map(|stored| stored.report).collect())
    }
}

/// Chunks without a recoverable match id are skipped.
pub fn build_reports<F>(chunks: &[MatchChunk], teams: Option<&TeamConfig>, mut on_report: F) -> Vec<MatchReport>
where
    F: FnMut(&MatchReport),
{
    let player_teams = teams.map(TeamConfig::player_team_map).unwrap_or_default();

    chunks
        .iter()
        .filter_map(|chunk| match &chunk.match_id {
            Some(match_id) => Some(build_match_report(match_id, &chunk.lines, &player_teams)),
            None => {
                tracing::debug!(lines = chunk.lines.len(), "dropping chunk without match id");
                None
            }
        })
        .inspect(|report| on_report(report))
        .collect()
}
