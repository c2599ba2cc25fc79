/*!
 * SQLite-backed statistics repository.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use rusqlite::{params, OptionalExtension};

use super::connection::DatabaseConnection;
use super::models::{AttemptRecord, GameStats};
use super::StatsStore;

/// Repository for statistics stored in SQLite
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl StatsStore for Repository {
    async fn get_stats(&self, game: &str) -> Result<Option<GameStats>> {
        let game = game.to_string();

        self.db
            .execute_async(move |conn| {
                let value: Option<String> = conn
                    .query_row(
                        "SELECT value FROM game_stats WHERE game = ?1",
                        [&game],
                        |row| row.get(0),
                    )
                    .optional()?;

                value
                    .map(|json| {
                        serde_json::from_str(&json)
                            .with_context(|| format!("Corrupt stats for game '{}'", game))
                    })
                    .transpose()
            })
            .await
    }

    async fn put_stats(&self, game: &str, stats: &GameStats) -> Result<()> {
        let game = game.to_string();
        let value = serde_json::to_string(stats)?;
        let now = chrono::Utc::now().to_rfc3339();

        debug!("Saving stats for '{}': {}", game, value);

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO game_stats (game, value, updated_at) VALUES (?1, ?2, ?3)
                    ON CONFLICT(game) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
                    "#,
                    params![game, value, now],
                )?;
                Ok(())
            })
            .await
    }

    async fn record_attempt(&self, attempt: &AttemptRecord) -> Result<()> {
        let attempt = attempt.clone();

        self.db
            .execute_async(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO attempts (
                        id, game, expected, recognized, match_type, similarity, is_correct, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        attempt.id,
                        attempt.game,
                        attempt.expected,
                        attempt.recognized,
                        attempt.match_type.to_string(),
                        attempt.similarity,
                        attempt.is_correct,
                        attempt.created_at,
                    ],
                )?;
                Ok(())
            })
            .await
    }

    async fn recent_attempts(&self, game: &str, limit: usize) -> Result<Vec<AttemptRecord>> {
        let game = game.to_string();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        self.db
            .execute_async(move |conn| {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT id, game, expected, recognized, match_type, similarity, is_correct, created_at
                    FROM attempts
                    WHERE game = ?1
                    ORDER BY created_at DESC, rowid DESC
                    LIMIT ?2
                    "#,
                )?;

                let rows = stmt.query_map(params![game, limit], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, f64>(5)?,
                        row.get::<_, bool>(6)?,
                        row.get::<_, String>(7)?,
                    ))
                })?;

                let mut attempts = Vec::new();
                for row in rows {
                    let (id, game, expected, recognized, match_type, similarity, is_correct, created_at) = row?;
                    attempts.push(AttemptRecord {
                        id,
                        game,
                        expected,
                        recognized,
                        match_type: match_type.parse()?,
                        similarity,
                        is_correct,
                        created_at,
                    });
                }
                Ok(attempts)
            })
            .await
    }

    async fn list_games(&self) -> Result<Vec<String>> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare("SELECT game FROM game_stats ORDER BY game")?;
                let games = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<rusqlite::Result<Vec<String>>>()?;
                Ok(games)
            })
            .await
    }

    async fn reset(&self, game: &str) -> Result<()> {
        let game = game.to_string();

        self.db
            .transaction_async(move |tx| {
                let stats = tx.execute("DELETE FROM game_stats WHERE game = ?1", [&game])?;
                let attempts = tx.execute("DELETE FROM attempts WHERE game = ?1", [&game])?;
                debug!("Reset '{}': removed {} stats rows and {} attempts", game, stats, attempts);
                Ok(())
            })
            .await
    }
}
