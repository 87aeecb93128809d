use serde::{Deserialize, Serialize};

use crate::domain::{Points, Team, TeamId};

/// One team's line in the league table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub rank: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub competitive: Points,
    pub fair_play: Points,
    pub referee: Points,
    pub stand: Points,
    pub educational: Points,
    pub total: Points,
}

impl StandingsRow {
    pub fn empty(team: &Team) -> Self {
        Self {
            rank: 0,
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            competitive: Points::ZERO,
            fair_play: Points::ZERO,
            referee: Points::ZERO,
            stand: Points::ZERO,
            educational: Points::ZERO,
            total: Points::ZERO,
        }
    }

    pub fn win_balance(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }

    /// Descending sort key: total, competitive, wins minus losses, educational
    pub fn rank_key(&self) -> (Points, Points, i64, Points) {
        (self.total, self.competitive, self.win_balance(), self.educational)
    }

    pub(crate) fn finish_totals(&mut self) {
        self.educational = self.fair_play + self.referee + self.stand;
        self.total = self.competitive + self.educational;
    }
}
