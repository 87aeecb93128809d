use log::debug;

use crate::config::SchedulingSettings;
use crate::domain::{MatchDescriptor, Team, TeamId};
use crate::errors::{EngineError, EngineResult};

use super::roles::staff_pairing;
use super::usage::RoleUsageTracker;

/// Generates one round with the Berger circle method.
///
/// `roster` must already be in roster order. Usage counters are updated as
/// each match is staffed, so the support roles balance within the round too.
pub fn schedule_round_robin(
    roster: &[Team],
    usage: &mut RoleUsageTracker,
    round: u32,
    sport: &str,
    settings: &SchedulingSettings,
) -> EngineResult<Vec<MatchDescriptor>> {
    if roster.len() < settings.round_robin_min_teams {
        return Err(EngineError::InsufficientTeams {
            required: settings.round_robin_min_teams,
            found: roster.len(),
        });
    }

    let ids: Vec<TeamId> = roster.iter().map(|team| team.id).collect();
    let pairings = berger_pairings(&ids, round);
    debug!("Round-robin round {}: {} pairings for {} teams", round, pairings.len(), ids.len());

    let matches = pairings
        .into_iter()
        .map(|(home, away)| {
            let roles = staff_pairing(roster, usage, home, away);
            MatchDescriptor::new(round, sport, roles)
        })
        .collect();

    Ok(matches)
}

/// Home/away pairs of a 1-based round; the team facing the bye rests.
pub fn berger_pairings(team_ids: &[TeamId], round: u32) -> Vec<(TeamId, TeamId)> {
    let mut slots: Vec<Option<TeamId>> = team_ids.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }

    let n = slots.len();
    if n < 2 {
        return Vec::new();
    }

    let rotation = rotation_index(round, n);
    slots[1..].rotate_left(rotation);

    (0..n / 2)
        .filter_map(|i| match (slots[i], slots[n - 1 - i]) {
            (Some(a), Some(b)) => Some(orient(a, b, rotation)),
            _ => None,
        })
        .collect()
}

fn rotation_index(round: u32, slot_count: usize) -> usize {
    (round.saturating_sub(1) as usize) % (slot_count - 1)
}

/// Even rotation index keeps the produced order, odd swaps it
fn orient(a: TeamId, b: TeamId, rotation: usize) -> (TeamId, TeamId) {
    if rotation % 2 == 0 { (a, b) } else { (b, a) }
}
