pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod scheduling;
pub mod scoring;
pub mod services;
pub mod standings;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use colored::Colorize;
use std::collections::HashMap;
use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::SportCatalog;
use crate::config::settings::{AppConfig, database_path};
use crate::database::{DbPool, league, setup, teams};
use crate::domain::{CompetitionMode, MatchDescriptor, MatchId, TeamId};
use crate::errors::parse_context;
use crate::scoring::{EvaluationInput, RefereeRatings, StandRatings};
use crate::services::standings::render_table;
use crate::services::{ImportService, SchedulingService, ScoringService, StandingsService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_pool() -> Result<DbPool> {
    let path = database_path();
    database::create_pool(&path).with_context(|| format!("Failed to open database {}", path))
}

/// Fails early with a hint instead of a bare "no such table"
fn open_league() -> Result<DbPool> {
    let pool = open_pool()?;
    let conn = database::get_connection(&pool)?;
    if !setup::is_initialized(&conn)? {
        anyhow::bail!("Database {} is not initialized, run `init` first", database_path());
    }
    Ok(pool)
}

pub fn handle_init(mode: CompetitionMode) -> Result<()> {
    let pool = open_pool()?;
    let conn = database::get_connection(&pool)?;
    setup::reset_database(&conn)?;
    league::set_mode(&conn, mode)?;
    println!("Initialized {} ({})", database_path(), mode.as_str());
    Ok(())
}

pub fn handle_import(file: &Path) -> Result<()> {
    let service = ImportService::new(AppConfig::new(), open_league()?);
    let snapshot = service.import_file(file)?;
    println!(
        "Imported {} teams and {} matches from {}",
        snapshot.teams.len(),
        snapshot.matches.len(),
        file.display()
    );
    Ok(())
}

pub fn handle_generate(round: u32, sport: &str) -> Result<()> {
    let pool = open_league()?;
    let service = SchedulingService::new(AppConfig::new(), pool.clone());
    let matches = service.generate(round, sport)?;

    let names = team_names(&pool)?;
    println!("{}", format!("Round {} · {}", round, sport).bold());
    for game in &matches {
        println!("{}", describe_match(game, &names));
    }
    Ok(())
}

pub fn handle_matches(round: u32) -> Result<()> {
    let pool = open_league()?;
    let games = SchedulingService::new(AppConfig::new(), pool.clone()).round(round)?;
    if games.is_empty() {
        println!("Round {} has no matches", round);
        return Ok(());
    }

    let names = team_names(&pool)?;
    println!("{}", format!("Round {}", round).bold());
    for game in &games {
        let status = if game.finalized {
            format!("{} - {}", game.home_points, game.away_points).green()
        } else {
            "pending".dimmed()
        };
        println!("{}  {}", describe_match(game, &names), status);
    }
    Ok(())
}

pub fn handle_score(match_id: MatchId, payload: &str) -> Result<()> {
    let payload: serde_json::Value =
        serde_json::from_str(payload).with_context(|| parse_context("scoreboard payload"))?;
    let service = ScoringService::new(AppConfig::new(), open_league()?);
    let game = service.record_score(match_id, &payload)?;
    println!(
        "Match {}: {} ({} - {})",
        match_id,
        game.outcome.as_str().green(),
        game.home_points,
        game.away_points
    );
    Ok(())
}

pub fn handle_evaluate(match_id: MatchId, input: &EvaluationInput) -> Result<()> {
    let service = ScoringService::new(AppConfig::new(), open_league()?);
    let game = service.record_evaluation(match_id, input)?;
    let eval = &game.evaluation;
    println!(
        "Match {}: fair play {} / {}, referee {}, stands {} / {}",
        match_id,
        eval.fair_play_home,
        eval.fair_play_away,
        eval.referee_points,
        eval.stand_home_points,
        eval.stand_away_points
    );
    Ok(())
}

pub fn handle_standings(export: Option<&Path>) -> Result<()> {
    let service = StandingsService::new(open_league()?);
    let rows = match export {
        Some(path) => service.export(path)?,
        None => service.compute()?,
    };
    println!("{}", render_table(&rows));
    Ok(())
}

pub fn handle_backup(dir: &Path, name: &str) -> Result<()> {
    let service = ImportService::new(AppConfig::new(), open_league()?);
    let path = service.backup(dir, name)?;
    println!("League saved to {}", path.display());
    Ok(())
}

pub fn handle_restore(dir: &Path, name: &str) -> Result<()> {
    let service = ImportService::new(AppConfig::new(), open_league()?);
    let snapshot = service.restore(dir, name)?;
    println!(
        "Restored {} teams and {} matches",
        snapshot.teams.len(),
        snapshot.matches.len()
    );
    if let Some(rows) = service.saved_standings(dir, name)? {
        println!("Standings at backup time:");
        println!("{}", render_table(&rows));
    }
    Ok(())
}

pub fn handle_badges(team_id: TeamId) -> Result<()> {
    let config = AppConfig::new();
    let service = StandingsService::new(open_league()?);
    let (team, earned) = service.badges(team_id, &config.badges)?;

    if earned.is_empty() {
        println!("{} has no badges yet", team.name);
        return Ok(());
    }
    println!("{}", team.name.bold());
    for badge in earned {
        println!("  {:<18} {}", badge.title().yellow(), badge.description());
    }
    Ok(())
}

pub fn handle_sports() -> Result<()> {
    for sport in SportCatalog::builtin().list() {
        let draws = if sport.allows_draw { "draws" } else { "no draws" };
        println!(
            "{:<20} {:<24} {:<14} {}",
            sport.code.bold(),
            sport.name,
            sport.outcome_kind.as_str(),
            draws.dimmed()
        );
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

/// Builds evaluation input from comma-separated CLI rating lists
pub fn evaluation_input(
    referee: Option<&[u8]>,
    stand_home: Option<&[u8]>,
    stand_away: Option<&[u8]>,
    fair_play_home: Option<u8>,
    fair_play_away: Option<u8>,
) -> Result<EvaluationInput> {
    let referee = referee
        .map(|values| rating_triple("referee", values))
        .transpose()?
        .map(|[knowledge, management, support]| RefereeRatings {
            knowledge,
            management,
            support,
        });
    let stand = |label: &str, values: Option<&[u8]>| -> Result<Option<StandRatings>> {
        Ok(values
            .map(|values| rating_triple(label, values))
            .transpose()?
            .map(|[encouragement, respect, participation]| StandRatings {
                encouragement,
                respect,
                participation,
            }))
    };

    Ok(EvaluationInput {
        fair_play_home,
        fair_play_away,
        referee,
        stand_home: stand("stand-home", stand_home)?,
        stand_away: stand("stand-away", stand_away)?,
    })
}

fn rating_triple(label: &str, values: &[u8]) -> Result<[Option<u8>; 3]> {
    if values.is_empty() || values.len() > 3 {
        anyhow::bail!("--{} takes one to three ratings, got {}", label, values.len());
    }
    let mut triple = [None; 3];
    for (slot, value) in triple.iter_mut().zip(values) {
        *slot = Some(*value);
    }
    Ok(triple)
}

fn team_names(pool: &DbPool) -> Result<HashMap<TeamId, String>> {
    let conn = database::get_connection(pool)?;
    Ok(teams::list_all(&conn)?
        .into_iter()
        .map(|team| (team.id, team.name))
        .collect())
}

fn describe_match(game: &MatchDescriptor, names: &HashMap<TeamId, String>) -> String {
    let name = |id: Option<TeamId>| match id {
        Some(id) => names.get(&id).cloned().unwrap_or_else(|| format!("#{}", id)),
        None => "-".to_string(),
    };
    let roles = &game.roles;

    format!(
        "  [{}] {} vs {}  referee: {}  stands: {} / {}  code {}",
        game.id.map(|id| id.to_string()).unwrap_or_default(),
        name(Some(roles.home)),
        name(Some(roles.away)),
        name(roles.referee),
        name(roles.stand_home),
        name(roles.stand_away),
        game.access_code.cyan()
    )
}
