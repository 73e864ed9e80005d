use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use tetrion_engine::{LeaderboardSource, ScoreEntry};

use crate::util;

/// Number of records kept in the leaderboard file.
pub const MAX_ENTRIES: usize = 10;

/// A saved score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub name: String,
    pub score: usize,
    /// When the score was saved (ISO 8601 format)
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LeaderboardError {
    #[display("failed to read leaderboard file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse leaderboard file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Leaderboard stored as a JSON array of [`LeaderboardRecord`]s.
///
/// The file holds at most [`MAX_ENTRIES`] records sorted by descending score.
/// A missing file is an empty leaderboard.
#[derive(Debug, Clone)]
pub struct JsonLeaderboard {
    path: PathBuf,
}

impl JsonLeaderboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<LeaderboardRecord>, LeaderboardError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(source) => {
                return Err(LeaderboardError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| LeaderboardError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Adds a score, keeping the best [`MAX_ENTRIES`] records.
    ///
    /// A new score ranks below existing records with the same score.
    pub fn submit(&self, name: &str, score: usize) -> anyhow::Result<()> {
        let mut records = self.load()?;
        records.push(LeaderboardRecord {
            name: name.to_owned(),
            score,
            timestamp: Utc::now(),
        });
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(MAX_ENTRIES);
        util::write_json_file("leaderboard", &self.path, &records)?;
        info!("saved score {score} for {name:?} to {}", self.path.display());
        Ok(())
    }
}

impl LeaderboardSource for JsonLeaderboard {
    type Error = LeaderboardError;

    fn top_scores(&mut self) -> Result<Vec<ScoreEntry>, Self::Error> {
        Ok(self
            .load()?
            .into_iter()
            .map(|record| ScoreEntry::new(record.name, record.score))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::util::testing::temp_path;

    #[test]
    fn test_missing_file_is_empty() {
        let mut board = JsonLeaderboard::new(temp_path("missing/leaderboard.json"));
        assert!(board.load().unwrap().is_empty());
        assert!(board.top_scores().unwrap().is_empty());
    }

    #[test]
    fn test_submit_keeps_best_scores_sorted() {
        let board = JsonLeaderboard::new(temp_path("data/leaderboard.json"));
        for (i, score) in [300, 1200, 100, 700, 0, 900, 500, 1100, 200, 800, 400, 1000]
            .into_iter()
            .enumerate()
        {
            board.submit(&format!("player{i}"), score).unwrap();
        }

        let records = board.load().unwrap();
        let scores: Vec<_> = records.iter().map(|r| r.score).collect();
        assert_eq!(
            scores,
            [1200, 1100, 1000, 900, 800, 700, 500, 400, 300, 200]
        );
        assert_eq!(records[0].name, "player1");
    }

    #[test]
    fn test_equal_score_ranks_below_existing() {
        let mut board = JsonLeaderboard::new(temp_path("leaderboard.json"));
        board.submit("first", 500).unwrap();
        board.submit("second", 500).unwrap();
        let names: Vec<_> = board
            .top_scores()
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn test_file_format() {
        let path = temp_path("leaderboard.json");
        JsonLeaderboard::new(&path).submit("alice", 300).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let record = &json[0];
        assert_eq!(record["name"], "alice");
        assert_eq!(record["score"], 300);
        assert!(record["timestamp"].as_str().unwrap().parse::<DateTime<Utc>>().is_ok());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let path = temp_path("leaderboard.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let mut board = JsonLeaderboard::new(&path);
        assert!(matches!(board.load(), Err(LeaderboardError::Parse { .. })));
        assert!(board.top_scores().is_err());
        assert!(board.submit("bob", 100).is_err());
    }
}
