use log::debug;

use crate::config::SchedulingSettings;
use crate::domain::{MatchDescriptor, Team};
use crate::errors::{EngineError, EngineResult};

use super::roles::staff_pairing;
use super::usage::RoleUsageTracker;

/// Generates one match for every unordered pair of teams.
///
/// Home goes to whichever team of the pair has hosted less so far; the
/// earlier team in roster order wins a tie.
pub fn schedule_all_pairs(
    roster: &[Team],
    usage: &mut RoleUsageTracker,
    round: u32,
    sport: &str,
    settings: &SchedulingSettings,
) -> EngineResult<Vec<MatchDescriptor>> {
    if roster.len() < settings.all_pairs_min_teams {
        return Err(EngineError::InsufficientTeams {
            required: settings.all_pairs_min_teams,
            found: roster.len(),
        });
    }

    let mut matches = Vec::with_capacity(roster.len() * roster.len().saturating_sub(1) / 2);

    for (idx, first) in roster.iter().enumerate() {
        for second in &roster[idx + 1..] {
            let (home, away) = if usage.get(first.id).home <= usage.get(second.id).home {
                (first.id, second.id)
            } else {
                (second.id, first.id)
            };

            let roles = staff_pairing(roster, usage, home, away);
            matches.push(MatchDescriptor::new(round, sport, roles));
        }
    }

    debug!("All-pairs round {}: {} matches for {} teams", round, matches.len(), roster.len());
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TeamId;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn roster(names: &[&str]) -> Vec<Team> {
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| Team::new(idx as i64 + 1, name))
            .collect()
    }

    #[test]
    fn test_four_teams_cover_every_pair() {
        let teams = roster(&["A", "B", "C", "D"]);
        let matches = schedule_all_pairs(
            &teams,
            &mut RoleUsageTracker::new(),
            1,
            "football",
            &SchedulingSettings::default(),
        )
        .unwrap();

        assert_eq!(matches.len(), 6);
        let pairs: HashSet<(TeamId, TeamId)> = matches
            .iter()
            .map(|m| (m.roles.home.min(m.roles.away), m.roles.home.max(m.roles.away)))
            .collect();
        let expected: HashSet<(TeamId, TeamId)> =
            [(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)].into_iter().collect();
        assert_eq!(pairs, expected);

        for m in &matches {
            assert_eq!(m.roles.referee, None);
            assert_eq!(m.roles.stand_home, None);
            assert_eq!(m.roles.stand_away, None);
        }
    }

    #[test]
    fn test_single_team_is_rejected() {
        let result = schedule_all_pairs(
            &roster(&["A"]),
            &mut RoleUsageTracker::new(),
            1,
            "football",
            &SchedulingSettings::default(),
        );
        assert_eq!(result, Err(EngineError::InsufficientTeams { required: 2, found: 1 }));
    }

    #[test]
    fn test_two_teams_make_one_match() {
        let matches = schedule_all_pairs(
            &roster(&["A", "B"]),
            &mut RoleUsageTracker::new(),
            1,
            "football",
            &SchedulingSettings::default(),
        )
        .unwrap();
        assert_eq!(matches.len(), 1);
        assert_ne!(matches[0].roles.home, matches[0].roles.away);
    }

    #[test]
    fn test_home_goes_to_least_used_host() {
        let teams = roster(&["A", "B", "C"]);
        let mut usage = RoleUsageTracker::new();
        let matches =
            schedule_all_pairs(&teams, &mut usage, 1, "football", &SchedulingSettings::default())
                .unwrap();

        // A already hosted once, so C hosts the second pairing
        assert_eq!((matches[0].roles.home, matches[0].roles.away), (1, 2));
        assert_eq!((matches[1].roles.home, matches[1].roles.away), (3, 1));
        assert_eq!((matches[2].roles.home, matches[2].roles.away), (2, 3));
    }

    proptest! {
        #[test]
        fn prop_generates_n_choose_two(n in 2i64..12) {
            let teams: Vec<Team> = (1..=n).map(|id| Team::new(id, &format!("T{:02}", id))).collect();
            let matches = schedule_all_pairs(
                &teams,
                &mut RoleUsageTracker::new(),
                1,
                "generic",
                &SchedulingSettings::default(),
            ).unwrap();

            let n = n as usize;
            prop_assert_eq!(matches.len(), n * (n - 1) / 2);
            for m in &matches {
                prop_assert_ne!(m.roles.home, m.roles.away);
                let assigned = m.roles.assigned();
                let distinct: HashSet<TeamId> = assigned.iter().copied().collect();
                prop_assert_eq!(assigned.len(), distinct.len());
            }
        }
    }
}
