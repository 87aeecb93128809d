use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::CompetitionMode;

const MODE_KEY: &str = "mode";

/// Stored competition mode, single-sport when never set
pub fn get_mode(conn: &Connection) -> Result<CompetitionMode> {
    let sql = "SELECT value FROM league WHERE key = ?1";

    let value: Option<String> = conn
        .query_row(sql, params![MODE_KEY], |row| row.get(0))
        .optional()
        .context("Failed to query competition mode")?;

    match value {
        Some(value) => value.parse().map_err(anyhow::Error::msg),
        None => Ok(CompetitionMode::default()),
    }
}

pub fn set_mode(conn: &Connection, mode: CompetitionMode) -> Result<()> {
    let sql = "INSERT INTO league (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";

    conn.execute(sql, params![MODE_KEY, mode.as_str()])
        .context("Failed to store competition mode")?;
    Ok(())
}
