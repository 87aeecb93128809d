use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{CompetitionMode, MatchDescriptor, Team};
use crate::errors::snapshot_context;
use crate::standings::StandingsRow;

/// Everything needed to rebuild a league: mode, roster and match history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    #[serde(default)]
    pub mode: CompetitionMode,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<MatchDescriptor>,
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}

/// Directory of pretty-printed JSON snapshots
pub struct Snapshots {
    league_dir: PathBuf,
    standings_dir: PathBuf,
}

impl Snapshots {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let league_dir = root.join("league");
        let standings_dir = root.join("standings");

        fs::create_dir_all(&league_dir).context("Failed to create league snapshot directory")?;
        fs::create_dir_all(&standings_dir)
            .context("Failed to create standings snapshot directory")?;

        Ok(Self {
            league_dir,
            standings_dir,
        })
    }

    pub fn save_league(&self, key: &str, league: &LeagueSnapshot) -> Result<PathBuf> {
        let path = self.league_dir.join(format!("{}.json", key));
        write_json(&path, league)?;
        info!("Saved league snapshot: {}", path.display());
        Ok(path)
    }

    pub fn load_league(&self, key: &str) -> Result<Option<LeagueSnapshot>> {
        read_json_opt(&self.league_dir.join(format!("{}.json", key)))
    }

    pub fn save_standings(&self, key: &str, rows: &[StandingsRow]) -> Result<PathBuf> {
        let path = self.standings_dir.join(format!("{}.json", key));
        write_json(&path, &rows)?;
        info!("Saved standings snapshot: {}", path.display());
        Ok(path)
    }

    pub fn load_standings(&self, key: &str) -> Result<Option<Vec<StandingsRow>>> {
        read_json_opt(&self.standings_dir.join(format!("{}.json", key)))
    }
}

/// Reads a league snapshot from an arbitrary path; a missing file is an error
pub fn read_league_file(path: &Path) -> Result<LeagueSnapshot> {
    read_json_opt(path)?.with_context(|| snapshot_context("find", path))
}

pub fn write_standings_file(path: &Path, rows: &[StandingsRow]) -> Result<()> {
    write_json(path, &rows)?;
    info!("Exported standings to {}", path.display());
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .with_context(|| snapshot_context("serialize", path))?;
    fs::write(path, json).with_context(|| snapshot_context("write", path))?;
    Ok(())
}

fn read_json_opt<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path).with_context(|| snapshot_context("read", path))?;
    let data = serde_json::from_str(&json).with_context(|| {
        format!(
            "Failed to parse JSON from {:?}. First 200 chars: {}",
            path,
            json.chars().take(200).collect::<String>()
        )
    })?;
    Ok(Some(data))
}
