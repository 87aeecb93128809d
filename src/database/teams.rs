use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::{Team, TeamId};

pub fn upsert_team(conn: &Connection, team: &Team) -> Result<Team> {
    let sql = "INSERT INTO teams (id, name) VALUES (?1, ?2) ON CONFLICT(id) DO UPDATE SET name = excluded.name RETURNING id, name";

    conn.query_row(sql, params![team.id, team.name], parse_team_row)
        .with_context(|| format!("Failed to upsert team {}", team.id))
}

fn parse_team_row(row: &rusqlite::Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn find_by_id(conn: &Connection, id: TeamId) -> Result<Option<Team>> {
    let sql = "SELECT id, name FROM teams WHERE id = ?1";

    conn.query_row(sql, params![id], parse_team_row)
        .optional()
        .context("Failed to query team by id")
}

/// Whole roster in roster order
pub fn list_all(conn: &Connection) -> Result<Vec<Team>> {
    let sql = "SELECT id, name FROM teams ORDER BY name, id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_team_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list teams")?;

    Ok(rows)
}
