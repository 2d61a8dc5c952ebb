//! High score leaderboard system
//!
//! Persisted to LocalStorage, tracks top 10 scores.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub rounds_cleared: u32,
    pub best_streak: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "tally_tiles_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished game to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending by score; ties keep the older entry first
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from storage
    pub fn load() -> Self {
        match storage::load_json::<HighScores>(Self::STORAGE_KEY) {
            Some(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self) {
        if storage::save_json(Self::STORAGE_KEY, self) {
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            rounds_cleared: (score / 10) as u32,
            best_streak: 1,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(entry(50)), Some(1));
        assert_eq!(scores.add(entry(80)), Some(1));
        assert_eq!(scores.add(entry(60)), Some(2));
        assert_eq!(scores.add(entry(60)), Some(3));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![80, 60, 60, 50]);
        assert_eq!(scores.top_score(), Some(80));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add(entry(0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_board_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add(entry(s * 10));
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.add(entry(5)), None);
        assert_eq!(scores.add(entry(55)), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }
}
