pub mod access_code;
pub mod all_pairs;
pub mod roles;
pub mod round_robin;
pub mod usage;

use log::info;
use rand::Rng;

use crate::config::{SchedulingSettings, SportCatalog};
use crate::domain::{CompetitionMode, MatchDescriptor, Team, sort_roster};
use crate::errors::EngineResult;

pub use access_code::{AccessCodeGenerator, fill_access_codes};
pub use all_pairs::schedule_all_pairs;
pub use round_robin::{berger_pairings, schedule_round_robin};
pub use usage::{RoleUsage, RoleUsageTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    RoundRobin,
    AllPairs,
}

impl Strategy {
    pub fn as_str(&self) -> &str {
        match self {
            Strategy::RoundRobin => "round-robin",
            Strategy::AllPairs => "all-pairs",
        }
    }
}

/// Multi-sport rounds and small rosters play every pairing
pub fn select_strategy(
    mode: CompetitionMode,
    team_count: usize,
    settings: &SchedulingSettings,
) -> Strategy {
    if mode == CompetitionMode::MultiSport || team_count <= settings.all_pairs_max_teams {
        Strategy::AllPairs
    } else {
        Strategy::RoundRobin
    }
}

#[derive(Debug, Clone)]
pub struct RoundRequest {
    pub round: u32,
    pub sport: String,
    pub mode: CompetitionMode,
}

impl RoundRequest {
    pub fn new(round: u32, sport: &str, mode: CompetitionMode) -> Self {
        Self {
            round,
            sport: sport.to_string(),
            mode,
        }
    }
}

/// Builds the full replacement set of matches for one round.
///
/// Matches already stored for `request.round` are left out of the usage
/// history, so regenerating a round is idempotent apart from access codes.
pub fn generate_round<R: Rng + ?Sized>(
    roster: &[Team],
    history: &[MatchDescriptor],
    request: &RoundRequest,
    catalog: &SportCatalog,
    settings: &SchedulingSettings,
    rng: &mut R,
) -> EngineResult<Vec<MatchDescriptor>> {
    let sport = catalog.get(&request.sport)?;

    let mut teams = roster.to_vec();
    sort_roster(&mut teams);

    let mut usage = RoleUsageTracker::from_history(history, Some(request.round));
    let strategy = select_strategy(request.mode, teams.len(), settings);

    let mut matches = match strategy {
        Strategy::RoundRobin => {
            schedule_round_robin(&teams, &mut usage, request.round, &sport.code, settings)?
        }
        Strategy::AllPairs => {
            schedule_all_pairs(&teams, &mut usage, request.round, &sport.code, settings)?
        }
    };

    let mut codes = AccessCodeGenerator::new(request.round, settings);
    for m in &mut matches {
        m.access_code = codes.next_code(rng)?;
    }

    info!(
        "Generated {} {} matches for round {} ({})",
        matches.len(),
        strategy.as_str(),
        request.round,
        sport.name
    );
    Ok(matches)
}
