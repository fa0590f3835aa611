//! High score leaderboard
//!
//! Best run heights in meters, persisted as a plain text file with one value
//! per line. Tracks the top 5.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// Default leaderboard file name
pub const HIGHSCORES_FILE: &str = "highscores.txt";

/// Credits record message steps
const RECORD_STEP_M: f64 = 500.0;
const RECORD_TOP_M: f64 = 10_000.0;

/// High score leaderboard, sorted descending
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HighScores {
    pub entries: Vec<f64>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: f64) -> bool {
        if !score.is_finite() {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|&e| score > e).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|&e| score > e);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run's final height; returns the rank achieved (1-indexed)
    pub fn add_score(&mut self, score: f64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(rank - 1, score);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<f64> {
        self.entries.first().copied()
    }

    /// Credits line teasing the next 500 m step past the best run
    pub fn record_message(&self) -> String {
        let record = self.top_score().unwrap_or(0.0);
        if record >= RECORD_TOP_M {
            return "You Win... I could never make it to the top, I'm glad you could".to_string();
        }
        let mut milestone = RECORD_STEP_M;
        while record >= milestone && milestone < RECORD_TOP_M {
            milestone += RECORD_STEP_M;
        }
        format!("My record is {}m, can you beat it?", milestone)
    }

    /// Parse the one-value-per-line format; unparsable lines are skipped
    pub fn parse(text: &str) -> Self {
        let mut entries: Vec<f64> = text
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                match line.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    _ => {
                        if !line.is_empty() {
                            log::warn!("Skipping bad high score line: {:?}", line);
                        }
                        None
                    }
                }
            })
            .collect();
        entries.sort_by(|a, b| b.total_cmp(a));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Render in the one-value-per-line format
    pub fn to_text(&self) -> String {
        self.entries.iter().map(|e| format!("{e}\n")).collect()
    }

    fn read(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    /// Load high scores from `path`, starting fresh if it is missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Save high scores to `path`
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match fs::write(path, self.to_text()) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Could not save {}: {}", path.display(), e),
        }
    }
}
