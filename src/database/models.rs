/*!
 * Statistics models.
 *
 * `GameStats` is the value stored per game key; `AttemptRecord` is one row
 * of the attempt log.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::{MatchResult, MatchType};

/// Running score for one game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Items played
    pub played: u64,
    /// Items answered correctly
    pub correct: u64,
    /// Consecutive correct answers up to the last item
    pub current_streak: u32,
    /// Longest streak ever reached
    pub best_streak: u32,
    /// When the game was last played (RFC 3339)
    #[serde(default)]
    pub last_played: Option<String>,
}

impl GameStats {
    /// Count one played item
    pub fn record(&mut self, correct: bool, now: DateTime<Utc>) {
        self.played += 1;
        if correct {
            self.correct += 1;
            self.current_streak += 1;
            self.best_streak = self.best_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
        self.last_played = Some(now.to_rfc3339());
    }

    /// Fraction of played items answered correctly, 0 when nothing was played
    pub fn accuracy(&self) -> f64 {
        if self.played == 0 {
            0.0
        } else {
            self.correct as f64 / self.played as f64
        }
    }
}

impl std::fmt::Display for GameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} correct ({:.0}%), streak {}, best {}",
            self.correct,
            self.played,
            self.accuracy() * 100.0,
            self.current_streak,
            self.best_streak
        )
    }
}

/// One checked answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub id: String,
    pub game: String,
    pub expected: String,
    pub recognized: String,
    pub match_type: MatchType,
    pub similarity: f64,
    pub is_correct: bool,
    pub created_at: String,
}

impl AttemptRecord {
    /// Build a record for a fresh check result
    pub fn new(game: &str, expected: &str, recognized: &str, result: &MatchResult) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            game: game.to_string(),
            expected: expected.to_string(),
            recognized: recognized.to_string(),
            match_type: result.match_type,
            similarity: result.similarity,
            is_correct: result.is_correct,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}
