use crate::analysis::report::MatchReport;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const ARCHIVE_FILE: &str = "matches.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredMatch {
    pub id: u64,
    pub recorded_at: DateTime<Utc>,
    pub report: MatchReport,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub id: u64,
    #[serde(rename = "matchId")]
    pub match_id: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<&StoredMatch> for MatchSummary {
    fn from(stored: &StoredMatch) -> Self {
        MatchSummary {
            id: stored.id,
            match_id: stored.report.match_id.clone(),
            recorded_at: stored.recorded_at,
        }
    }
}

/// Storage for match reports. Match ids are unique across the store.
pub trait MatchRepository {
    /// Stores every report or none of them.
    fn save(&mut self, reports: Vec<MatchReport>) -> Result<Vec<StoredMatch>, AppError>;

    fn fetch_all(&self) -> Result<Vec<StoredMatch>, AppError>;

    fn fetch_by_match_id(&self, match_id: &str) -> Result<Option<StoredMatch>, AppError>;
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct MatchArchive {
    pub last_updated: Option<DateTime<Utc>>,
    pub next_id: u64,
    pub matches: Vec<StoredMatch>,
}

impl MatchArchive {
    fn append(&mut self, reports: Vec<MatchReport>) -> Result<Vec<StoredMatch>, AppError> {
        let mut seen: HashSet<&str> = self
            .matches
            .iter()
            .map(|m| m.report.match_id.as_str())
            .collect();

        for report in &reports {
            if !seen.insert(report.match_id.as_str()) {
                tracing::warn!(match_id = %report.match_id, "rejecting duplicate match");
                return Err(AppError::DuplicateMatch(report.match_id.clone()));
            }
        }

        let now = Utc::now();
        let stored: Vec<StoredMatch> = reports
            .into_iter()
            .enumerate()
            .map(|(offset, report)| StoredMatch {
                id: self.next_id + offset as u64 + 1,
                recorded_at: now,
                report,
            })
            .collect();

        self.next_id += stored.len() as u64;
        self.matches.extend(stored.iter().cloned());
        self.last_updated = Some(now);

        Ok(stored)
    }

    fn find(&self, match_id: &str) -> Option<StoredMatch> {
        self.matches
            .iter()
            .find(|m| m.report.match_id == match_id)
            .cloned()
    }
}

/// Whole archive kept in one pretty-printed JSON file.
pub struct JsonMatchStore {
    path: PathBuf,
    archive: MatchArchive,
}

impl JsonMatchStore {
    pub fn open(data_dir: &Path) -> Result<Self, AppError> {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(format!("Failed to create {}: {}", data_dir.display(), e))
        })?;

        let path = data_dir.join(ARCHIVE_FILE);
        let archive = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                AppError::Json(format!("Failed to parse match archive: {}", e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MatchArchive::default(),
            Err(e) => {
                return Err(AppError::Io(format!("Failed to read {}: {}", path.display(), e)));
            }
        };

        Ok(JsonMatchStore { path, archive })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, archive: &MatchArchive) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(archive).map_err(|e| {
            AppError::Json(format!("Failed to serialize match archive: {}", e))
        })?;

        fs::write(&self.path, json).map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl MatchRepository for JsonMatchStore {
    fn save(&mut self, reports: Vec<MatchReport>) -> Result<Vec<StoredMatch>, AppError> {
        let mut updated = self.archive.clone();
        let stored = updated.append(reports)?;
        self.persist(&updated)?;
        self.archive = updated;

        tracing::info!(count = stored.len(), path = %self.path.display(), "saved match reports");
        Ok(stored)
    }

    fn fetch_all(&self) -> Result<Vec<StoredMatch>, AppError> {
        Ok(self.archive.matches.clone())
    }

    fn fetch_by_match_id(&self, match_id: &str) -> Result<Option<StoredMatch>, AppError> {
        Ok(self.archive.find(match_id))
    }
}

/// In-process store with the same uniqueness rules as the JSON store.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryMatchStore {
    archive: MatchArchive,
}

#[cfg(test)]
impl MatchRepository for MemoryMatchStore {
    fn save(&mut self, reports: Vec<MatchReport>) -> Result<Vec<StoredMatch>, AppError> {
        self.archive.append(reports)
    }

    fn fetch_all(&self) -> Result<Vec<StoredMatch>, AppError> {
        Ok(self.archive.matches.clone())
    }

    fn fetch_by_match_id(&self, match_id: &str) -> Result<Option<StoredMatch>, AppError> {
        Ok(self.archive.find(match_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn report(match_id: &str) -> MatchReport {
        MatchReport {
            match_id: match_id.to_string(),
            total_kills: 0,
            players: Vec::new(),
            ranking: Vec::new(),
            deaths: IndexMap::new(),
            highest_streaks: IndexMap::new(),
            awards: Vec::new(),
            winner_favorite_weapon: None,
        }
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = JsonMatchStore::open(dir.path()).unwrap();
        let saved = store.save(vec![report("1"), report("2")]).unwrap();
        assert_eq!(saved.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);

        let reopened = JsonMatchStore::open(dir.path()).unwrap();
        let all = reopened.fetch_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(reopened.fetch_by_match_id("2").unwrap().map(|m| m.id), Some(2));
        assert_eq!(reopened.fetch_by_match_id("3").unwrap(), None);
    }

    #[test]
    fn missing_archive_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonMatchStore::open(&dir.path().join("nested")).unwrap();

        assert!(store.fetch_all().unwrap().is_empty());
        assert!(!store.path().exists(), "nothing is written until the first save");
    }

    #[test]
    fn duplicate_match_rejects_whole_batch() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonMatchStore::open(dir.path()).unwrap();
        store.save(vec![report("1")]).unwrap();

        let err = store.save(vec![report("2"), report("1")]).unwrap_err();
        assert!(matches!(err, AppError::DuplicateMatch(ref id) if id == "1"));

        let reopened = JsonMatchStore::open(dir.path()).unwrap();
        assert_eq!(reopened.fetch_all().unwrap().len(), 1);
        assert_eq!(store.fetch_all().unwrap().len(), 1);
    }

    #[test]
    fn duplicate_within_batch_is_rejected() {
        let mut store = MemoryMatchStore::default();

        let err = store.save(vec![report("5"), report("5")]).unwrap_err();
        assert!(matches!(err, AppError::DuplicateMatch(_)));
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn ids_keep_increasing_across_saves() {
        let mut store = MemoryMatchStore::default();
        store.save(vec![report("a")]).unwrap();
        let second = store.save(vec![report("b"), report("c")]).unwrap();

        assert_eq!(second.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(MatchSummary::from(&second[1]).match_id, "c");
    }
}
