/*!
 * In-memory statistics store.
 */

use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::models::{AttemptRecord, GameStats};
use super::StatsStore;

#[derive(Debug, Default)]
struct MemoryState {
    stats: BTreeMap<String, GameStats>,
    attempts: Vec<AttemptRecord>,
}

/// Statistics store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    state: Mutex<MemoryState>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total attempts recorded across all games
    pub async fn attempt_count(&self) -> usize {
        self.state.lock().await.attempts.len()
    }
}

#[async_trait]
impl StatsStore for MemoryStatsStore {
    async fn get_stats(&self, game: &str) -> Result<Option<GameStats>> {
        Ok(self.state.lock().await.stats.get(game).cloned())
    }

    async fn put_stats(&self, game: &str, stats: &GameStats) -> Result<()> {
        self.state
            .lock()
            .await
            .stats
            .insert(game.to_string(), stats.clone());
        Ok(())
    }

    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<()> {
        self.state.lock().await.attempts.push(attempt.clone());
        Ok(())
    }

    async fn recent_attempts(&self, game: &str, limit: usize) -> Result<Vec<AttemptRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .attempts
            .iter()
            .rev()
            .filter(|a| a.game == game)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_games(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().await.stats.keys().cloned().collect())
    }

    async fn reset(&self, game: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        state.stats.remove(game);
        state.attempts.retain(|a| a.game != game);
        Ok(())
    }
}
