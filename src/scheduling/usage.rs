use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{MatchDescriptor, RoleSlots, TeamId};

/// How often a team has held each role bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleUsage {
    pub home: u32,
    pub away: u32,
    pub referee: u32,
    pub stand: u32,
}

/// Per-team role counters replayed from match history
#[derive(Debug, Clone, Default)]
pub struct RoleUsageTracker {
    usage: HashMap<TeamId, RoleUsage>,
}

impl RoleUsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replays every match outside `exclude_round`, scheduled or final
    pub fn from_history(history: &[MatchDescriptor], exclude_round: Option<u32>) -> Self {
        let mut tracker = Self::new();
        history
            .iter()
            .filter(|m| Some(m.round) != exclude_round)
            .for_each(|m| tracker.record(&m.roles));
        tracker
    }

    pub fn record(&mut self, roles: &RoleSlots) {
        self.entry(roles.home).home += 1;
        self.entry(roles.away).away += 1;
        if let Some(referee) = roles.referee {
            self.entry(referee).referee += 1;
        }
        for stand in [roles.stand_home, roles.stand_away].into_iter().flatten() {
            self.entry(stand).stand += 1;
        }
    }

    /// Teams never seen have all-zero usage
    pub fn get(&self, team: TeamId) -> RoleUsage {
        self.usage.get(&team).copied().unwrap_or_default()
    }

    fn entry(&mut self, team: TeamId) -> &mut RoleUsage {
        self.usage.entry(team).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_match(round: u32, roles: [TeamId; 5]) -> MatchDescriptor {
        let slots = RoleSlots {
            home: roles[0],
            away: roles[1],
            referee: Some(roles[2]),
            stand_home: Some(roles[3]),
            stand_away: Some(roles[4]),
        };
        MatchDescriptor::new(round, "football", slots)
    }

    #[test]
    fn test_counts_every_role() {
        let history = vec![full_match(1, [1, 2, 3, 4, 5]), full_match(2, [3, 1, 2, 5, 4])];
        let tracker = RoleUsageTracker::from_history(&history, None);

        assert_eq!(tracker.get(1), RoleUsage { home: 1, away: 1, referee: 0, stand: 0 });
        assert_eq!(tracker.get(2), RoleUsage { home: 0, away: 1, referee: 1, stand: 0 });
        assert_eq!(tracker.get(4), RoleUsage { home: 0, away: 0, referee: 0, stand: 2 });
    }

    #[test]
    fn test_excluded_round_is_ignored() {
        let history = vec![full_match(1, [1, 2, 3, 4, 5]), full_match(2, [1, 2, 3, 4, 5])];
        let tracker = RoleUsageTracker::from_history(&history, Some(2));
        assert_eq!(tracker.get(1).home, 1);
    }

    #[test]
    fn test_absent_team_is_zero() {
        let tracker = RoleUsageTracker::new();
        assert_eq!(tracker.get(42), RoleUsage::default());
    }

    #[test]
    fn test_empty_support_slots_are_not_counted() {
        let mut tracker = RoleUsageTracker::new();
        tracker.record(&RoleSlots::playing(1, 2));
        assert_eq!(tracker.usage.len(), 2);
    }
}
