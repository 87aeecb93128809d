pub mod models;
pub mod points;
pub mod scoreboard;

pub use models::{
    CompetitionMode, Evaluation, MatchDescriptor, MatchId, Outcome, OutcomeKind, RefereeRatings,
    RoleSlots, SportConfig, SportParams, StandRatings, Team, TeamId, mean_rating, sort_roster,
};
pub use points::Points;
pub use scoreboard::{Scoreboard, SideTotals, TowerLine, TriesLine};
