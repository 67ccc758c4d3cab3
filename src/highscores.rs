//! High score leaderboard system
//!
//! Every finished run with a score is one record. The public board shows
//! one entry per player (their best), highest first.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entries returned when the caller does not ask for a size
pub const DEFAULT_LIMIT: usize = 10;
/// Largest board a caller can request
pub const MAX_LIMIT: usize = 100;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,
    #[error("name must be at least 2 characters (got {0})")]
    TooShort(usize),
    #[error("name must be at most 20 characters (got {0})")]
    TooLong(usize),
}

/// A validated player name: trimmed, 2 to 20 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let name = raw.trim();
        let len = name.chars().count();
        if len == 0 {
            return Err(NameError::Empty);
        }
        if len < NAME_MIN_CHARS {
            return Err(NameError::TooShort(len));
        }
        if len > NAME_MAX_CHARS {
            return Err(NameError::TooLong(len));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

/// One stored run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: u64,
    pub username: String,
    pub score: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
    /// Unix timestamp (ms)
    pub created_at_ms: u64,
}

/// A row of the public board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-indexed
    pub rank: usize,
    pub username: String,
    pub score: u64,
    pub created_at_ms: u64,
}

/// Resolve a requested board size: missing or zero means the default,
/// anything else is clamped to `1..=MAX_LIMIT`
pub fn clamp_limit(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_LIMIT,
        Some(n) if n < 0 => 1,
        Some(n) => board_size(usize::try_from(n).unwrap_or(MAX_LIMIT)),
    }
}

/// Board size for an already parsed limit; zero means the default
fn board_size(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

/// All stored runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    records: Vec<ScoreRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next record will get; continues after the largest stored id
    pub fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    /// Store a run and return the new record
    pub fn add(
        &mut self,
        username: &str,
        score: u64,
        wallet: Option<String>,
        created_at_ms: u64,
    ) -> ScoreRecord {
        let record = ScoreRecord {
            id: self.next_id(),
            username: username.to_string(),
            score,
            wallet,
            created_at_ms,
        };
        self.records.push(record.clone());
        record
    }

    /// Drop a record by id (used to undo an add that could not be saved)
    pub fn remove(&mut self, id: u64) -> Option<ScoreRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// One entry per username (their best run), highest first. Equal
    /// scores rank by who got there first. A `limit` of 0 gives the
    /// default board size.
    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut best: HashMap<&str, &ScoreRecord> = HashMap::new();
        for record in &self.records {
            best.entry(record.username.as_str())
                .and_modify(|current| {
                    if earlier_or_better(record, *current) {
                        *current = record;
                    }
                })
                .or_insert(record);
        }

        let mut rows: Vec<&ScoreRecord> = best.into_values().collect();
        rows.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.created_at_ms.cmp(&b.created_at_ms))
                .then(a.id.cmp(&b.id))
        });

        rows.into_iter()
            .take(board_size(limit))
            .enumerate()
            .map(|(i, r)| LeaderboardEntry {
                rank: i + 1,
                username: r.username.clone(),
                score: r.score,
                created_at_ms: r.created_at_ms,
            })
            .collect()
    }

    /// Best score on the board (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.records.iter().map(|r| r.score).max()
    }

    /// Best score for one player
    pub fn best_for(&self, username: &str) -> Option<u64> {
        self.records
            .iter()
            .filter(|r| r.username == username)
            .map(|r| r.score)
            .max()
    }

    /// Rank `score` would reach on a board of `limit` entries
    /// (1-indexed, None if it would not make the board)
    pub fn potential_rank(&self, score: u64, limit: usize) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let board = self.top(limit);
        let rank = board.iter().position(|e| score > e.score).unwrap_or(board.len()) + 1;
        (rank <= board_size(limit)).then_some(rank)
    }
}

fn earlier_or_better(candidate: &ScoreRecord, current: &ScoreRecord) -> bool {
    candidate.score > current.score
        || (candidate.score == current.score
            && (candidate.created_at_ms, candidate.id) < (current.created_at_ms, current.id))
}

/// Format a timestamp relative to `now_ms`
pub fn format_age(now_ms: u64, timestamp_ms: u64) -> String {
    let diff_mins = now_ms.saturating_sub(timestamp_ms) / 60_000;
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_days >= 1 {
        if diff_days == 1 {
            "Yesterday".to_string()
        } else {
            format!("{} days ago", diff_days)
        }
    } else if diff_hours >= 1 {
        if diff_hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", diff_hours)
        }
    } else if diff_mins >= 1 {
        if diff_mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", diff_mins)
        }
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[(&str, u64, u64)]) -> HighScores {
        let mut scores = HighScores::new();
        for (name, score, at) in rows {
            scores.add(name, *score, None, *at);
        }
        scores
    }

    #[test]
    fn test_name_validation() {
        assert_eq!(PlayerName::parse("  Max  ").unwrap().as_str(), "Max");
        assert_eq!(PlayerName::parse("   "), Err(NameError::Empty));
        assert_eq!(PlayerName::parse(" a "), Err(NameError::TooShort(1)));
        assert_eq!(
            PlayerName::parse("abcdefghijklmnopqrstu"),
            Err(NameError::TooLong(21))
        );
        assert!(PlayerName::parse("abcdefghijklmnopqrst").is_ok());
        // Characters, not bytes
        assert!(PlayerName::parse("ñé").is_ok());
    }

    #[test]
    fn test_name_deserialize_validates() {
        let name: PlayerName = serde_json::from_str("\" Whoville \"").unwrap();
        assert_eq!(name.as_str(), "Whoville");
        assert!(serde_json::from_str::<PlayerName>("\"x\"").is_err());
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 10);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(25)), 25);
        assert_eq!(clamp_limit(Some(1000)), 100);
        assert_eq!(clamp_limit(Some(i64::MAX)), 100);
    }

    #[test]
    fn test_ids_continue_after_max() {
        let json = r#"[{"id": 41, "username": "Old", "score": 3, "created_at_ms": 0}]"#;
        let mut scores: HighScores = serde_json::from_str(json).unwrap();
        assert_eq!(scores.next_id(), 42);
        assert_eq!(scores.add("New", 1, None, 5).id, 42);
        assert_eq!(HighScores::new().next_id(), 1);
    }

    #[test]
    fn test_top_dedups_by_username() {
        let scores = board(&[
            ("Cindy", 5, 1),
            ("Max", 12, 2),
            ("Cindy", 30, 3),
            ("Max", 7, 4),
            ("Lou", 12, 5),
        ]);
        let top = scores.top(10);
        let rows: Vec<(&str, u64, usize)> = top
            .iter()
            .map(|e| (e.username.as_str(), e.score, e.rank))
            .collect();
        assert_eq!(rows, vec![("Cindy", 30, 1), ("Max", 12, 2), ("Lou", 12, 3)]);
    }

    #[test]
    fn test_top_tie_keeps_earliest_record() {
        let scores = board(&[("Max", 9, 50), ("Max", 9, 10)]);
        let top = scores.top(10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].created_at_ms, 10);
    }

    #[test]
    fn test_top_respects_limit() {
        let rows: Vec<(String, u64, u64)> = (0..30).map(|i| (format!("P{i}"), i, i)).collect();
        let mut scores = HighScores::new();
        for (name, score, at) in &rows {
            scores.add(name, *score, None, *at);
        }
        assert_eq!(scores.top(5).len(), 5);
        assert_eq!(scores.top(5)[0].score, 29);
        // Zero means the default size, not one row
        assert_eq!(scores.top(0).len(), DEFAULT_LIMIT);
        assert_eq!(scores.top(500).len(), 30);
        assert_eq!(scores.potential_rank(100, 0), Some(1));
        assert_eq!(scores.potential_rank(1, 0), None);
    }

    #[test]
    fn test_potential_rank() {
        let scores = board(&[("A", 30, 1), ("B", 20, 2), ("C", 10, 3)]);
        assert_eq!(scores.potential_rank(0, 10), None);
        assert_eq!(scores.potential_rank(25, 10), Some(2));
        assert_eq!(scores.potential_rank(5, 10), Some(4));
        assert_eq!(scores.potential_rank(5, 3), None);
        assert_eq!(scores.top_score(), Some(30));
        assert_eq!(scores.best_for("B"), Some(20));
        assert_eq!(scores.best_for("Z"), None);
    }

    #[test]
    fn test_remove_record() {
        let mut scores = board(&[("A", 3, 1)]);
        let record = scores.add("B", 4, None, 2);
        assert_eq!(scores.remove(record.id), Some(record));
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.remove(999), None);
    }

    #[test]
    fn test_record_json_shape() {
        let mut scores = HighScores::new();
        scores.add("Max", 7, None, 1_000);
        scores.add("Lou", 8, Some("0xabc".into()), 2_000);
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.starts_with('['));
        assert!(!json.contains("\"wallet\":null"));
        assert!(json.contains("\"wallet\":\"0xabc\""));

        let back: HighScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records(), scores.records());
    }

    #[test]
    fn test_format_age() {
        let now = 10 * 86_400_000;
        assert_eq!(format_age(now, now), "Just now");
        assert_eq!(format_age(now, now - 60_000), "1 min ago");
        assert_eq!(format_age(now, now - 5 * 60_000), "5 mins ago");
        assert_eq!(format_age(now, now - 3_600_000), "1 hour ago");
        assert_eq!(format_age(now, now - 86_400_000), "Yesterday");
        assert_eq!(format_age(now, now - 3 * 86_400_000), "3 days ago");
        // Clock skew
        assert_eq!(format_age(now, now + 5_000), "Just now");
    }
}
