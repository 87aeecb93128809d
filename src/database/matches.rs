use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

use crate::domain::{
    Evaluation, MatchDescriptor, MatchId, Outcome, Points, RoleSlots, Scoreboard,
};
use crate::errors::{EngineError, database_context};

const MATCH_COLUMNS: &str = "id, round, sport, home_id, away_id, referee_id, stand_home_id, stand_away_id, access_code, scoreboard, outcome, home_points, away_points, evaluation, finalized";

/// Deletes every match of `round` and inserts `matches` in its place.
///
/// Runs inside the caller's transaction, so readers see either the old
/// round or the new one. Returns the inserted matches with their ids.
pub fn replace_round(
    tx: &Transaction,
    round: u32,
    matches: &[MatchDescriptor],
) -> Result<Vec<MatchDescriptor>> {
    let deleted = tx
        .execute("DELETE FROM matches WHERE round = ?1", params![round])
        .with_context(|| database_context("clear round"))?;
    log::debug!("Cleared {} matches of round {}", deleted, round);

    let mut codes = HashSet::new();
    matches
        .iter()
        .map(|game| {
            if game.round != round {
                anyhow::bail!("Match for round {} passed to replace round {}", game.round, round);
            }
            if !codes.insert(game.access_code.as_str()) {
                return Err(EngineError::DuplicateAccessCode {
                    round,
                    code: game.access_code.clone(),
                }
                .into());
            }
            insert_match(tx, game)
        })
        .collect()
}

/// Inserts a match as given, ignoring any id it already carries.
///
/// Refuses role slots that repeat a team.
pub fn insert_match(conn: &Connection, game: &MatchDescriptor) -> Result<MatchDescriptor> {
    game.roles.validate()?;
    let sql = format!(
        "INSERT INTO matches (round, sport, home_id, away_id, referee_id, stand_home_id, stand_away_id, access_code, scoreboard, outcome, home_points, away_points, evaluation, finalized) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14) RETURNING {}",
        MATCH_COLUMNS
    );
    let roles = &game.roles;

    conn.query_row(
        &sql,
        params![
            game.round,
            game.sport,
            roles.home,
            roles.away,
            roles.referee,
            roles.stand_home,
            roles.stand_away,
            game.access_code,
            scoreboard_json(game)?,
            game.outcome.as_str(),
            game.home_points.halves(),
            game.away_points.halves(),
            to_json(&game.evaluation)?,
            game.finalized,
        ],
        parse_match_row,
    )
    .with_context(|| database_context("insert match"))
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchDescriptor> {
    let outcome: String = row.get(10)?;

    Ok(MatchDescriptor {
        id: row.get(0)?,
        round: row.get(1)?,
        sport: row.get(2)?,
        roles: RoleSlots {
            home: row.get(3)?,
            away: row.get(4)?,
            referee: row.get(5)?,
            stand_home: row.get(6)?,
            stand_away: row.get(7)?,
        },
        access_code: row.get(8)?,
        scoreboard: json_column::<Scoreboard>(row, 9)?,
        outcome: Outcome::from_name(&outcome),
        home_points: Points::from_halves(row.get(11)?),
        away_points: Points::from_halves(row.get(12)?),
        evaluation: json_column::<Evaluation>(row, 13)?.unwrap_or_default(),
        finalized: row.get(14)?,
    })
}

fn json_column<T: DeserializeOwned>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|json| {
        serde_json::from_str(&json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

fn scoreboard_json(game: &MatchDescriptor) -> Result<Option<String>> {
    game.scoreboard.as_ref().map(|scoreboard| to_json(scoreboard)).transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to serialize match column")
}

pub fn find_by_id(conn: &Connection, id: MatchId) -> Result<Option<MatchDescriptor>> {
    let sql = format!("SELECT {} FROM matches WHERE id = ?1", MATCH_COLUMNS);

    conn.query_row(&sql, params![id], parse_match_row)
        .optional()
        .context("Failed to query match by id")
}

/// Full history ordered by round, then insertion
pub fn list_all(conn: &Connection) -> Result<Vec<MatchDescriptor>> {
    let sql = format!("SELECT {} FROM matches ORDER BY round, id", MATCH_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list matches")?;

    Ok(rows)
}

pub fn list_by_round(conn: &Connection, round: u32) -> Result<Vec<MatchDescriptor>> {
    let sql = format!("SELECT {} FROM matches WHERE round = ?1 ORDER BY id", MATCH_COLUMNS);

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![round], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("Failed to list matches of round {}", round))?;

    Ok(rows)
}

/// Writes scoreboard, outcome, points and the finalized flag
pub fn update_result(conn: &Connection, game: &MatchDescriptor) -> Result<()> {
    let id = game.id.context("Cannot update result of an unsaved match")?;
    let sql = "UPDATE matches SET scoreboard = ?1, outcome = ?2, home_points = ?3, away_points = ?4, finalized = ?5 WHERE id = ?6";

    let updated = conn
        .execute(
            sql,
            params![
                scoreboard_json(game)?,
                game.outcome.as_str(),
                game.home_points.halves(),
                game.away_points.halves(),
                game.finalized,
                id,
            ],
        )
        .with_context(|| database_context("update match result"))?;
    ensure_updated(updated, id)
}

pub fn update_evaluation(conn: &Connection, id: MatchId, evaluation: &Evaluation) -> Result<()> {
    let sql = "UPDATE matches SET evaluation = ?1 WHERE id = ?2";

    let updated = conn
        .execute(sql, params![to_json(evaluation)?, id])
        .with_context(|| database_context("update match evaluation"))?;
    ensure_updated(updated, id)
}

fn ensure_updated(rows: usize, id: MatchId) -> Result<()> {
    if rows == 0 {
        return Err(EngineError::UnknownMatch(id).into());
    }
    Ok(())
}
