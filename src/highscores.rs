//! High score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 scores on this machine.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted best-first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "catchy_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a run, keeping the list sorted and capped. Returns the 0-based
    /// rank when the score made the board.
    pub fn record(&mut self, score: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, HighScoreEntry { score, timestamp });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Best score on the board, if any
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from LocalStorage, falling back to an empty board
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok())
            .flatten();
        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => Self::new(),
        }
    }

    /// Save to LocalStorage (best effort)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string(self)
            && let Some(storage) = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let board = HighScores::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_record_keeps_sorted_order() {
        let mut board = HighScores::new();
        board.record(5, 1.0);
        board.record(12, 2.0);
        board.record(8, 3.0);

        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![12, 8, 5]);
        assert_eq!(board.best(), Some(12));
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = HighScores::new();
        for s in 1..=15 {
            board.record(s, s as f64);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.best(), Some(15));
        // Low scores no longer qualify on a full board
        assert!(!board.qualifies(5));
        assert!(board.record(5, 99.0).is_none());
    }

    #[test]
    fn test_record_returns_rank() {
        let mut board = HighScores::new();
        assert_eq!(board.record(10, 1.0), Some(0));
        assert_eq!(board.record(20, 2.0), Some(0));
        assert_eq!(board.record(15, 3.0), Some(1));
    }
}
