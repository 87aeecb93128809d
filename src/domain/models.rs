use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::points::Points;
use crate::errors::{EngineError, EngineResult};
use super::scoreboard::Scoreboard;

pub type TeamId = i64;
pub type MatchId = i64;

/// Team taking part in a competition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    pub fn new(id: TeamId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Roster order used by every scheduler: by name, then by id.
pub fn sort_roster(teams: &mut [Team]) {
    teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

/// How a sport's raw scoreboard is reduced to two comparable values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Goals,
    Sets,
    Points,
    Tries,
    Runs,
    TowerCapture,
    Generic,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &str {
        match self {
            OutcomeKind::Goals => "goals",
            OutcomeKind::Sets => "sets",
            OutcomeKind::Points => "points",
            OutcomeKind::Tries => "tries",
            OutcomeKind::Runs => "runs",
            OutcomeKind::TowerCapture => "tower_capture",
            OutcomeKind::Generic => "generic",
        }
    }

    /// Unrecognized names fall back to the generic home/away scoreboard
    pub fn from_name(name: &str) -> Self {
        match name {
            "goals" => OutcomeKind::Goals,
            "sets" => OutcomeKind::Sets,
            "points" => OutcomeKind::Points,
            "tries" => OutcomeKind::Tries,
            "runs" => OutcomeKind::Runs,
            "tower_capture" => OutcomeKind::TowerCapture,
            _ => OutcomeKind::Generic,
        }
    }
}

/// Numeric parameters used by composite scoreboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportParams {
    pub try_value: i64,
    pub conversion_value: i64,
    pub tower_value: i64,
    pub cone_value: i64,
    pub cone_slots: u8,
}

impl Default for SportParams {
    fn default() -> Self {
        Self {
            try_value: 5,
            conversion_value: 2,
            tower_value: 3,
            cone_value: 1,
            cone_slots: 6,
        }
    }
}

/// Read-only sport reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportConfig {
    pub code: String,
    pub name: String,
    pub outcome_kind: OutcomeKind,
    pub allows_draw: bool,
    #[serde(default)]
    pub params: SportParams,
}

impl SportConfig {
    pub fn new(code: &str, name: &str, outcome_kind: OutcomeKind, allows_draw: bool) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            outcome_kind,
            allows_draw,
            params: SportParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionMode {
    #[default]
    SingleSport,
    MultiSport,
}

impl CompetitionMode {
    pub fn as_str(&self) -> &str {
        match self {
            CompetitionMode::SingleSport => "single_sport",
            CompetitionMode::MultiSport => "multi_sport",
        }
    }
}

impl FromStr for CompetitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_sport" | "single" => Ok(CompetitionMode::SingleSport),
            "multi_sport" | "multi" => Ok(CompetitionMode::MultiSport),
            other => Err(format!("unknown competition mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
    #[default]
    Pending,
}

impl Outcome {
    pub fn as_str(&self) -> &str {
        match self {
            Outcome::HomeWin => "home_win",
            Outcome::AwayWin => "away_win",
            Outcome::Draw => "draw",
            Outcome::Pending => "pending",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "home_win" => Outcome::HomeWin,
            "away_win" => Outcome::AwayWin,
            "draw" => Outcome::Draw,
            _ => Outcome::Pending,
        }
    }
}

/// The five simultaneous roles of a match.
///
/// Home and away are always distinct. Support slots stay empty when not
/// enough free teams exist; a filled slot never repeats another role's team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSlots {
    pub home: TeamId,
    pub away: TeamId,
    pub referee: Option<TeamId>,
    pub stand_home: Option<TeamId>,
    pub stand_away: Option<TeamId>,
}

impl RoleSlots {
    pub fn playing(home: TeamId, away: TeamId) -> Self {
        Self {
            home,
            away,
            referee: None,
            stand_home: None,
            stand_away: None,
        }
    }

    pub fn is_playing(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }

    /// Every assigned team, in slot order
    pub fn assigned(&self) -> Vec<TeamId> {
        let mut teams = vec![self.home, self.away];
        teams.extend(self.referee);
        teams.extend(self.stand_home);
        teams.extend(self.stand_away);
        teams
    }

    /// Fails on the first team that appears in two slots
    pub fn validate(&self) -> EngineResult<()> {
        let assigned = self.assigned();
        for (idx, team) in assigned.iter().enumerate() {
            if assigned[..idx].contains(team) {
                return Err(EngineError::RoleConflict { team: *team });
            }
        }
        Ok(())
    }
}

/// Referee quality ratings, each 0..=10 when given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefereeRatings {
    pub knowledge: Option<u8>,
    pub management: Option<u8>,
    pub support: Option<u8>,
}

impl RefereeRatings {
    pub fn new(knowledge: u8, management: u8, support: u8) -> Self {
        Self {
            knowledge: Some(knowledge),
            management: Some(management),
            support: Some(support),
        }
    }

    /// Takes every rating `other` carries, keeps the rest
    pub fn merge(&mut self, other: &RefereeRatings) {
        merge_slot(&mut self.knowledge, other.knowledge);
        merge_slot(&mut self.management, other.management);
        merge_slot(&mut self.support, other.support);
    }

    pub fn mean(&self) -> Option<f64> {
        mean_rating(&[self.knowledge, self.management, self.support])
    }
}

/// Stand-duty conduct ratings for one side, each 0..=10 when given
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandRatings {
    pub encouragement: Option<u8>,
    pub respect: Option<u8>,
    pub participation: Option<u8>,
}

impl StandRatings {
    pub fn new(encouragement: u8, respect: u8, participation: u8) -> Self {
        Self {
            encouragement: Some(encouragement),
            respect: Some(respect),
            participation: Some(participation),
        }
    }

    pub fn merge(&mut self, other: &StandRatings) {
        merge_slot(&mut self.encouragement, other.encouragement);
        merge_slot(&mut self.respect, other.respect);
        merge_slot(&mut self.participation, other.participation);
    }

    pub fn mean(&self) -> Option<f64> {
        mean_rating(&[self.encouragement, self.respect, self.participation])
    }
}

fn merge_slot(slot: &mut Option<u8>, value: Option<u8>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Mean over the ratings actually given
pub fn mean_rating(ratings: &[Option<u8>]) -> Option<f64> {
    let given: Vec<f64> = ratings.iter().flatten().map(|r| f64::from(*r)).collect();
    if given.is_empty() {
        return None;
    }
    Some(given.iter().sum::<f64>() / given.len() as f64)
}

/// Fair-play, referee and stand evaluation of one match.
///
/// Individual ratings are kept so later partial updates merge into them;
/// the means and points are derived from the stored ratings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(default)]
    pub referee: RefereeRatings,
    #[serde(default)]
    pub stand_home: StandRatings,
    #[serde(default)]
    pub stand_away: StandRatings,
    pub fair_play_home: Points,
    pub fair_play_away: Points,
    pub referee_mean: Option<f64>,
    pub referee_points: Points,
    pub stand_home_mean: Option<f64>,
    pub stand_home_points: Points,
    pub stand_away_mean: Option<f64>,
    pub stand_away_points: Points,
}

/// One generated match and, once played, its result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDescriptor {
    #[serde(default)]
    pub id: Option<MatchId>,
    pub round: u32,
    pub sport: String,
    pub roles: RoleSlots,
    pub access_code: String,
    #[serde(default)]
    pub scoreboard: Option<Scoreboard>,
    #[serde(default)]
    pub outcome: Outcome,
    #[serde(default)]
    pub home_points: Points,
    #[serde(default)]
    pub away_points: Points,
    #[serde(default)]
    pub evaluation: Evaluation,
    #[serde(default)]
    pub finalized: bool,
}

impl MatchDescriptor {
    pub fn new(round: u32, sport: &str, roles: RoleSlots) -> Self {
        Self {
            id: None,
            round,
            sport: sport.to_string(),
            roles,
            access_code: String::new(),
            scoreboard: None,
            outcome: Outcome::Pending,
            home_points: Points::ZERO,
            away_points: Points::ZERO,
            evaluation: Evaluation::default(),
            finalized: false,
        }
    }
}
