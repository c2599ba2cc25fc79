/*!
 * Statistics schema and migrations.
 *
 * `game_stats` maps a game name to a JSON `GameStats` blob and `attempts` is
 * an append-only log of checked answers. The applied version is kept in a
 * one-row `schema_version` table; migration N brings the schema from
 * version N to N + 1.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

const VERSION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_version (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        version INTEGER NOT NULL,
        updated_at TEXT NOT NULL
    );
"#;

const MIGRATIONS: &[&str] = &[
    // v1
    r#"
    CREATE TABLE IF NOT EXISTS game_stats (
        game TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS attempts (
        id TEXT PRIMARY KEY,
        game TEXT NOT NULL,
        expected TEXT NOT NULL,
        recognized TEXT NOT NULL,
        match_type TEXT NOT NULL,
        similarity REAL NOT NULL,
        is_correct INTEGER NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_attempts_game ON attempts(game, created_at);
    "#,
];

/// Version a fully migrated database reports
pub const SCHEMA_VERSION: i32 = MIGRATIONS.len() as i32;

/// Bring the schema up to [`SCHEMA_VERSION`]
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;

    if current >= SCHEMA_VERSION {
        debug!("Statistics schema is up to date (v{})", current);
        return Ok(());
    }

    info!("Migrating statistics schema from v{} to v{}", current, SCHEMA_VERSION);
    for (index, sql) in MIGRATIONS.iter().enumerate().skip(current.max(0) as usize) {
        let version = index as i32 + 1;
        conn.execute_batch(sql)
            .with_context(|| format!("Failed to apply schema migration v{}", version))?;
        conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
            [version],
        )?;
    }

    Ok(())
}

/// Version recorded in the database, 0 for a fresh file
pub fn schema_version(conn: &Connection) -> Result<i32> {
    conn.execute_batch(VERSION_TABLE)
        .context("Failed to create schema_version table")?;

    let version = conn
        .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| row.get(0))
        .optional()
        .context("Failed to read schema version")?;
    Ok(version.unwrap_or(0))
}
