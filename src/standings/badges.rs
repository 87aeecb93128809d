use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::BadgeSettings;
use crate::domain::{MatchDescriptor, TeamId, mean_rating};

/// Recognition a team earns from its educational record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FairPlayGold,
    BestFans,
    MasterReferee,
    Sportsmanship,
}

impl Badge {
    pub fn title(&self) -> &str {
        match self {
            Badge::FairPlayGold => "Gold Shield",
            Badge::BestFans => "Model Supporters",
            Badge::MasterReferee => "Master Whistle",
            Badge::Sportsmanship => "Sporting Spirit",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Badge::FairPlayGold => "Excellent fair play on average",
            Badge::BestFans => "Stand always respectful and lively",
            Badge::MasterReferee => "Outstanding refereeing on average",
            Badge::Sportsmanship => "Fair play never dropped below the floor",
        }
    }
}

/// Per-match samples of one team, split by the role it held
#[derive(Debug, Default)]
struct TeamRecord {
    fair_play: Vec<f64>,
    stand: Vec<f64>,
    referee: Vec<f64>,
}

impl TeamRecord {
    fn collect(team_id: TeamId, history: &[MatchDescriptor]) -> Self {
        let mut record = TeamRecord::default();

        for game in history.iter().filter(|m| m.finalized) {
            let roles = &game.roles;
            let eval = &game.evaluation;
            if roles.home == team_id {
                record.fair_play.push(eval.fair_play_home.as_f64());
                record.stand.push(eval.stand_home_points.as_f64());
            } else if roles.away == team_id {
                record.fair_play.push(eval.fair_play_away.as_f64());
                record.stand.push(eval.stand_away_points.as_f64());
            } else if roles.referee == Some(team_id) {
                record.referee.push(referee_score(game));
            }
        }

        record
    }
}

/// Unrated criteria count as zero; matches stored without ratings fall
/// back to their recorded mean
fn referee_score(game: &MatchDescriptor) -> f64 {
    let eval = &game.evaluation;
    let ratings = [
        eval.referee.knowledge,
        eval.referee.management,
        eval.referee.support,
    ];
    if ratings.iter().all(Option::is_none) {
        return eval.referee_mean.unwrap_or(0.0);
    }
    mean_rating(&ratings.map(|r| Some(r.unwrap_or(0)))).unwrap_or(0.0)
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn reaches(values: &[f64], threshold: f64) -> bool {
    average(values).is_some_and(|avg| avg >= threshold)
}

/// Badges earned by `team_id` over the finalized matches in `history`.
///
/// Playing matches feed the fair-play and stand averages, refereed ones the
/// referee average. Returned in a fixed order.
pub fn badges(
    team_id: TeamId,
    history: &[MatchDescriptor],
    settings: &BadgeSettings,
) -> Vec<Badge> {
    let record = TeamRecord::collect(team_id, history);
    let mut earned = Vec::new();

    if reaches(&record.fair_play, settings.fair_play_gold_average) {
        earned.push(Badge::FairPlayGold);
    }
    if reaches(&record.stand, settings.best_fans_average) {
        earned.push(Badge::BestFans);
    }
    if reaches(&record.referee, settings.master_referee_average) {
        earned.push(Badge::MasterReferee);
    }
    if record.fair_play.len() >= settings.sportsmanship_min_matches
        && record
            .fair_play
            .iter()
            .all(|value| *value >= settings.sportsmanship_floor)
    {
        earned.push(Badge::Sportsmanship);
    }

    debug!(
        "Team {} earned {} badges from {} played and {} refereed matches",
        team_id,
        earned.len(),
        record.fair_play.len(),
        record.referee.len()
    );
    earned
}
