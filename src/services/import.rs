use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use rand::Rng;
use rusqlite::TransactionBehavior;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cache::{LeagueSnapshot, Snapshots, read_league_file};
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool, league, matches, teams};
use crate::domain::MatchDescriptor;
use crate::scheduling::fill_access_codes;
use crate::standings::{StandingsRow, compute_standings};

/// Moves whole leagues between JSON snapshots and the database
pub struct ImportService {
    config: AppConfig,
    pool: DbPool,
}

impl ImportService {
    pub fn new(config: AppConfig, pool: DbPool) -> Self {
        Self { config, pool }
    }

    pub fn import_file(&self, path: &Path) -> Result<LeagueSnapshot> {
        let snapshot = read_league_file(path)?;
        self.import(&snapshot)?;
        Ok(snapshot)
    }

    pub fn import(&self, snapshot: &LeagueSnapshot) -> Result<()> {
        let mut rng = rand::thread_rng();
        self.import_with_rng(snapshot, &mut rng)
    }

    /// Upserts the roster and replaces every round the snapshot carries.
    ///
    /// Matches without an access code get a fresh one; a round that repeats
    /// a code or a team across roles is refused and nothing is written.
    pub fn import_with_rng<R: Rng + ?Sized>(
        &self,
        snapshot: &LeagueSnapshot,
        rng: &mut R,
    ) -> Result<()> {
        let mut rounds = group_by_round(&snapshot.matches);
        for (round, games) in rounds.iter_mut() {
            fill_access_codes(*round, games, &self.config.scheduling, rng)?;
        }

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start import transaction")?;

        league::set_mode(&tx, snapshot.mode)?;
        for team in &snapshot.teams {
            teams::upsert_team(&tx, team)?;
        }
        for (round, games) in &rounds {
            matches::replace_round(&tx, *round, games)?;
        }

        tx.commit().context("Failed to commit import")?;
        info!(
            "Imported {} teams and {} matches in {} rounds ({})",
            snapshot.teams.len(),
            snapshot.matches.len(),
            rounds.len(),
            snapshot.mode.as_str()
        );
        Ok(())
    }

    pub fn snapshot(&self) -> Result<LeagueSnapshot> {
        let conn = database::get_connection(&self.pool)?;
        Ok(LeagueSnapshot {
            mode: league::get_mode(&conn)?,
            teams: teams::list_all(&conn)?,
            matches: matches::list_all(&conn)?,
            exported_at: Some(Utc::now()),
        })
    }

    /// Saves the league and its current standings under `key`
    pub fn backup(&self, dir: &Path, key: &str) -> Result<PathBuf> {
        let snapshots = Snapshots::new(dir)?;
        let league = self.snapshot()?;
        let rows = compute_standings(&league.teams, &league.matches);

        snapshots.save_standings(key, &rows)?;
        snapshots.save_league(key, &league)
    }

    pub fn restore(&self, dir: &Path, key: &str) -> Result<LeagueSnapshot> {
        let snapshots = Snapshots::new(dir)?;
        let league = snapshots
            .load_league(key)?
            .with_context(|| format!("No league backup named {} in {}", key, dir.display()))?;
        self.import(&league)?;
        Ok(league)
    }

    /// Standings table stored alongside the `key` backup, if any
    pub fn saved_standings(&self, dir: &Path, key: &str) -> Result<Option<Vec<StandingsRow>>> {
        Snapshots::new(dir)?.load_standings(key)
    }
}

fn group_by_round(games: &[MatchDescriptor]) -> BTreeMap<u32, Vec<MatchDescriptor>> {
    let mut rounds: BTreeMap<u32, Vec<MatchDescriptor>> = BTreeMap::new();
    for game in games {
        rounds.entry(game.round).or_default().push(game.clone());
    }
    rounds
}
