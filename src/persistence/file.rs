//! Leaderboard persisted as a JSON array of records

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::atomic::write_text_atomic;
use super::{PersistenceError, ScoreSink, unix_millis};
use crate::highscores::{HighScores, LeaderboardEntry, ScoreRecord};

#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    scores: HighScores,
}

impl FileScoreStore {
    /// Open the store at `path`. A missing file is an empty board; an
    /// unreadable or corrupt one is logged and also treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match Self::read(&path) {
            Ok(Some(scores)) => {
                log::info!("Loaded {} scores from {}", scores.len(), path.display());
                scores
            }
            Ok(None) => {
                log::info!("No score file at {}, starting fresh", path.display());
                HighScores::new()
            }
            Err(e) => {
                log::warn!("Ignoring score file: {e}");
                HighScores::new()
            }
        };
        Self { path, scores }
    }

    fn read(path: &Path) -> Result<Option<HighScores>, PersistenceError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    /// Write the whole board to disk
    pub fn save(&self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&self.scores)?;
        write_text_atomic(&self.path, &json).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Saved {} scores to {}", self.scores.len(), self.path.display());
        Ok(())
    }
}

impl ScoreSink for FileScoreStore {
    fn submit(&mut self, username: &str, score: u64) -> Result<ScoreRecord, PersistenceError> {
        let record = self.scores.add(username, score, None, unix_millis());
        if let Err(e) = self.save() {
            self.scores.remove(record.id);
            return Err(e);
        }
        log::info!("Saved score {} for {} (id {})", score, username, record.id);
        Ok(record)
    }

    fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.scores.top(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::open(dir.path().join("board.json"));
        assert!(store.scores().is_empty());
    }

    #[test]
    fn test_scores_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");

        let mut store = FileScoreStore::open(&path);
        store.submit("Cindy", 12).unwrap();
        let last = store.submit("Max", 3).unwrap();

        let mut reopened = FileScoreStore::open(&path);
        assert_eq!(reopened.scores().len(), 2);
        let next = reopened.submit("Lou", 8).unwrap();
        assert_eq!(next.id, last.id + 1);

        let names: Vec<String> = reopened.top(10).into_iter().map(|e| e.username).collect();
        assert_eq!(names, vec!["Cindy", "Lou", "Max"]);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileScoreStore::open(&path);
        assert!(store.scores().is_empty());
        store.submit("Max", 5).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let stored: HighScores = serde_json::from_str(&text).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_failed_save_is_rolled_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the replace fail
        let path = dir.path().join("board.json");
        fs::create_dir(&path).unwrap();

        let mut store = FileScoreStore::open(&path);
        let err = store.submit("Max", 5).unwrap_err();
        assert!(matches!(err, PersistenceError::Io { .. }));
        assert!(store.scores().is_empty());
    }
}
