/*!
 * Statistics persistence.
 *
 * Scores are kept behind the `StatsStore` key-value interface:
 * - `Repository`: SQLite-backed store
 * - `MemoryStatsStore`: in-process store for tests and throwaway sessions
 */

use anyhow::Result;
use async_trait::async_trait;

pub mod schema;
pub mod connection;
pub mod repository;
pub mod memory;
pub mod models;

// Re-export main types
pub use connection::DatabaseConnection;
pub use memory::MemoryStatsStore;
pub use models::{AttemptRecord, GameStats};
pub use repository::Repository;

/// Key-value store for per-game statistics
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Stats for a game, `None` if it was never played
    async fn get_stats(&self, game: &str) -> Result<Option<GameStats>>;

    /// Replace the stats for a game
    async fn put_stats(&self, game: &str, stats: &GameStats) -> Result<()>;

    /// Append an attempt to the log
    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<()>;

    /// Most recent attempts for a game, newest first
    async fn recent_attempts(&self, game: &str, limit: usize) -> Result<Vec<AttemptRecord>>;

    /// Games with stored stats, sorted by name
    async fn list_games(&self) -> Result<Vec<String>>;

    /// Remove a game's stats and attempts
    async fn reset(&self, game: &str) -> Result<()>;
}
