use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::path::Path;

use crate::cache::write_standings_file;
use crate::config::BadgeSettings;
use crate::database::{self, DbPool, matches, teams};
use crate::domain::{Team, TeamId};
use crate::standings::{Badge, StandingsRow, badges, compute_standings};

/// Re-derives the league table from stored history on every call
pub struct StandingsService {
    pool: DbPool,
}

impl StandingsService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn badges(
        &self,
        team_id: TeamId,
        settings: &BadgeSettings,
    ) -> Result<(Team, Vec<Badge>)> {
        let conn = database::get_connection(&self.pool)?;
        let team = teams::find_by_id(&conn, team_id)?
            .with_context(|| format!("Team not found: {}", team_id))?;
        let history = matches::list_all(&conn)?;

        let earned = badges(team_id, &history, settings);
        info!("Team {} holds {} badges", team.name, earned.len());
        Ok((team, earned))
    }

    pub fn compute(&self) -> Result<Vec<StandingsRow>> {
        let conn = database::get_connection(&self.pool)?;
        let roster = teams::list_all(&conn)?;
        let history = matches::list_all(&conn)?;

        let rows = compute_standings(&roster, &history);
        info!("Computed standings for {} teams", rows.len());
        Ok(rows)
    }

    pub fn export(&self, path: &Path) -> Result<Vec<StandingsRow>> {
        let rows = self.compute()?;
        write_standings_file(path, &rows)?;
        Ok(rows)
    }
}

/// Plain-text league table, leader highlighted
pub fn render_table(rows: &[StandingsRow]) -> String {
    let mut lines = vec![format!(
        "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>6} {:>6} {:>6}",
        "#", "Team", "P", "W", "D", "L", "Comp", "Edu", "Total"
    )
    .bold()
    .to_string()];

    for row in rows {
        let line = format!(
            "{:>3}  {:<24} {:>3} {:>3} {:>3} {:>3} {:>6} {:>6} {:>6}",
            row.rank,
            row.team_name,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.competitive.to_string(),
            row.educational.to_string(),
            row.total.to_string()
        );
        lines.push(if row.rank == 1 && row.played > 0 {
            line.green().to_string()
        } else {
            line
        });
    }

    lines.join("\n")
}
