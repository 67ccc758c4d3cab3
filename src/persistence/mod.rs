//! Score persistence
//!
//! Features:
//! - `ScoreSink` trait the game controller submits finished runs to
//! - JSON file store with atomic replace (tmp file, then rename)
//! - In-memory store for tests and hosts without a disk

mod atomic;
pub mod file;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::highscores::{HighScores, LeaderboardEntry, ScoreRecord};

pub use file::FileScoreStore;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid score data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score store unavailable: {0}")]
    Unavailable(String),
}

/// Where finished runs go
pub trait ScoreSink {
    /// Store one run and return the stored record
    fn submit(&mut self, username: &str, score: u64) -> Result<ScoreRecord, PersistenceError>;

    /// Public board, one entry per player. `limit` is capped at 100; 0
    /// means the default of 10.
    fn top(&self, limit: usize) -> Vec<LeaderboardEntry>;
}

/// Wall-clock time in Unix milliseconds
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Keeps scores in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: HighScores,
    offline: Option<String>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every submission with `reason`
    pub fn offline(reason: impl Into<String>) -> Self {
        Self {
            scores: HighScores::new(),
            offline: Some(reason.into()),
        }
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }
}

impl ScoreSink for MemoryScoreStore {
    fn submit(&mut self, username: &str, score: u64) -> Result<ScoreRecord, PersistenceError> {
        if let Some(reason) = &self.offline {
            return Err(PersistenceError::Unavailable(reason.clone()));
        }
        Ok(self.scores.add(username, score, None, unix_millis()))
    }

    fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.scores.top(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryScoreStore::new();
        let first = store.submit("Max", 4).unwrap();
        let second = store.submit("Max", 9).unwrap();
        assert_eq!(second.id, first.id + 1);

        let top = store.top(10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].score, 9);
        assert_eq!(store.scores().len(), 2);
    }

    #[test]
    fn test_offline_store_rejects() {
        let mut store = MemoryScoreStore::offline("no network");
        let err = store.submit("Max", 4).unwrap_err();
        assert!(matches!(err, PersistenceError::Unavailable(_)));
        assert!(err.to_string().contains("no network"));
        assert!(store.top(10).is_empty());
    }
}
