use crate::domain::{RoleSlots, Team, TeamId};

use super::usage::RoleUsageTracker;

/// Referee plus the two stand-duty teams
const SUPPORT_ROLES: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportRoles {
    pub referee: Option<TeamId>,
    pub stand_home: Option<TeamId>,
    pub stand_away: Option<TeamId>,
}

/// Picks referee and stand-duty teams among teams not playing this match.
///
/// Referee: lowest referee usage, then stand usage, then id. Stands: the
/// two lowest stand usages of the rest, then referee usage, then id. With
/// fewer than three free teams every support slot stays empty.
pub fn select_support_roles(
    roster: &[Team],
    usage: &RoleUsageTracker,
    home: TeamId,
    away: TeamId,
) -> SupportRoles {
    let mut available: Vec<TeamId> = roster
        .iter()
        .map(|team| team.id)
        .filter(|&id| id != home && id != away)
        .collect();

    if available.len() < SUPPORT_ROLES {
        return SupportRoles::default();
    }

    available.sort_by_key(|&id| {
        let u = usage.get(id);
        (u.referee, u.stand, id)
    });
    let referee = available.remove(0);

    available.sort_by_key(|&id| {
        let u = usage.get(id);
        (u.stand, u.referee, id)
    });

    SupportRoles {
        referee: Some(referee),
        stand_home: available.first().copied(),
        stand_away: available.get(1).copied(),
    }
}

/// Fills the support slots of a pairing and books every role in `usage`
pub fn staff_pairing(
    roster: &[Team],
    usage: &mut RoleUsageTracker,
    home: TeamId,
    away: TeamId,
) -> RoleSlots {
    let support = select_support_roles(roster, usage, home, away);
    let roles = RoleSlots {
        home,
        away,
        referee: support.referee,
        stand_home: support.stand_home,
        stand_away: support.stand_away,
    };
    usage.record(&roles);
    roles
}
