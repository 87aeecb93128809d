use serde::{Deserialize, Serialize};

use crate::config::ScoringSettings;
use crate::domain::{Evaluation, MatchDescriptor, Points, RefereeRatings, StandRatings};
use crate::errors::{EngineError, EngineResult};

impl RefereeRatings {
    fn validate(&self, max: u8) -> EngineResult<()> {
        check_rating("referee.knowledge", self.knowledge, max)?;
        check_rating("referee.management", self.management, max)?;
        check_rating("referee.support", self.support, max)
    }
}

impl StandRatings {
    fn validate(&self, max: u8) -> EngineResult<()> {
        check_rating("stand.encouragement", self.encouragement, max)?;
        check_rating("stand.respect", self.respect, max)?;
        check_rating("stand.participation", self.participation, max)
    }
}

/// Evaluation components to apply; `None` leaves the stored value alone,
/// down to single ratings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub fair_play_home: Option<u8>,
    pub fair_play_away: Option<u8>,
    pub referee: Option<RefereeRatings>,
    pub stand_home: Option<StandRatings>,
    pub stand_away: Option<StandRatings>,
}

fn check_rating(field: &'static str, value: Option<u8>, max: u8) -> EngineResult<()> {
    match value {
        Some(value) if value > max => Err(EngineError::InvalidRating { field, value }),
        _ => Ok(()),
    }
}

pub fn referee_reward(mean: Option<f64>, settings: &ScoringSettings) -> Points {
    match mean {
        Some(mean) if mean >= settings.referee_threshold => settings.referee_points,
        _ => Points::ZERO,
    }
}

/// Top tier is strictly above its threshold; the mid tier includes its own
pub fn stand_reward(mean: Option<f64>, settings: &ScoringSettings) -> Points {
    match mean {
        Some(mean) if mean > settings.stand_top_threshold => settings.stand_top_points,
        Some(mean) if mean >= settings.stand_mid_threshold => settings.stand_mid_points,
        _ => Points::ZERO,
    }
}

fn fair_play_points(flag: u8) -> Points {
    Points::whole(i64::from(flag))
}

/// Validates the whole input, then merges the ratings it carries into the
/// stored ones and recomputes the affected means and rewards.
///
/// Nothing is written when any rating is out of range. A component whose
/// stored ratings are all empty keeps its previous points.
pub fn apply_evaluation(
    evaluation: &mut Evaluation,
    input: &EvaluationInput,
    settings: &ScoringSettings,
) -> EngineResult<()> {
    check_rating("fair_play_home", input.fair_play_home, 1)?;
    check_rating("fair_play_away", input.fair_play_away, 1)?;
    if let Some(referee) = &input.referee {
        referee.validate(settings.max_rating)?;
    }
    for stand in [&input.stand_home, &input.stand_away].into_iter().flatten() {
        stand.validate(settings.max_rating)?;
    }

    if let Some(flag) = input.fair_play_home {
        evaluation.fair_play_home = fair_play_points(flag);
    }
    if let Some(flag) = input.fair_play_away {
        evaluation.fair_play_away = fair_play_points(flag);
    }
    if let Some(referee) = &input.referee {
        evaluation.referee.merge(referee);
        if let Some(mean) = evaluation.referee.mean() {
            evaluation.referee_mean = Some(mean);
            evaluation.referee_points = referee_reward(Some(mean), settings);
        }
    }
    if let Some(stand) = &input.stand_home {
        evaluation.stand_home.merge(stand);
        if let Some(mean) = evaluation.stand_home.mean() {
            evaluation.stand_home_mean = Some(mean);
            evaluation.stand_home_points = stand_reward(Some(mean), settings);
        }
    }
    if let Some(stand) = &input.stand_away {
        evaluation.stand_away.merge(stand);
        if let Some(mean) = evaluation.stand_away.mean() {
            evaluation.stand_away_mean = Some(mean);
            evaluation.stand_away_points = stand_reward(Some(mean), settings);
        }
    }

    Ok(())
}

pub fn evaluate_match(
    game: &mut MatchDescriptor,
    input: &EvaluationInput,
    settings: &ScoringSettings,
) -> EngineResult<()> {
    apply_evaluation(&mut game.evaluation, input, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referee_mean_meets_threshold() {
        let settings = ScoringSettings::default();
        let ratings = RefereeRatings::new(8, 7, 9);
        assert_eq!(ratings.mean(), Some(8.0));
        assert_eq!(referee_reward(ratings.mean(), &settings), Points::whole(2));
    }

    #[test]
    fn test_referee_below_threshold() {
        let settings = ScoringSettings::default();
        let ratings = RefereeRatings::new(4, 5, 5);
        assert_eq!(referee_reward(ratings.mean(), &settings), Points::ZERO);
    }

    #[test]
    fn test_stand_boundary_three_is_lower_tier() {
        let settings = ScoringSettings::default();
        let ratings = StandRatings::new(3, 3, 3);
        assert_eq!(stand_reward(ratings.mean(), &settings), Points::HALF);
    }

    #[test]
    fn test_stand_tiers() {
        let settings = ScoringSettings::default();
        assert_eq!(stand_reward(Some(3.5), &settings), Points::whole(1));
        assert_eq!(stand_reward(Some(2.0), &settings), Points::HALF);
        assert_eq!(stand_reward(Some(1.9), &settings), Points::ZERO);
        assert_eq!(stand_reward(None, &settings), Points::ZERO);
    }

    #[test]
    fn test_out_of_range_rating_writes_nothing() {
        let settings = ScoringSettings::default();
        let mut evaluation = Evaluation::default();
        let input = EvaluationInput {
            fair_play_home: Some(1),
            referee: Some(RefereeRatings {
                knowledge: Some(11),
                ..RefereeRatings::default()
            }),
            ..EvaluationInput::default()
        };

        assert_eq!(
            apply_evaluation(&mut evaluation, &input, &settings),
            Err(EngineError::InvalidRating { field: "referee.knowledge", value: 11 })
        );
        assert_eq!(evaluation, Evaluation::default());
    }

    #[test]
    fn test_fair_play_is_zero_or_one() {
        let input = EvaluationInput {
            fair_play_away: Some(2),
            ..EvaluationInput::default()
        };
        let result = apply_evaluation(&mut Evaluation::default(), &input, &ScoringSettings::default());
        assert_eq!(
            result,
            Err(EngineError::InvalidRating { field: "fair_play_away", value: 2 })
        );
    }

    #[test]
    fn test_partial_input_keeps_other_components() {
        let settings = ScoringSettings::default();
        let mut evaluation = Evaluation::default();

        let first = EvaluationInput {
            fair_play_home: Some(1),
            fair_play_away: Some(1),
            referee: Some(RefereeRatings::new(8, 7, 9)),
            ..EvaluationInput::default()
        };
        apply_evaluation(&mut evaluation, &first, &settings).unwrap();

        let second = EvaluationInput {
            fair_play_away: Some(0),
            stand_home: Some(StandRatings::new(4, 4, 2)),
            ..EvaluationInput::default()
        };
        apply_evaluation(&mut evaluation, &second, &settings).unwrap();

        assert_eq!(evaluation.fair_play_home, Points::whole(1));
        assert_eq!(evaluation.fair_play_away, Points::ZERO);
        assert_eq!(evaluation.referee_points, Points::whole(2));
        assert_eq!(evaluation.stand_home_mean, Some(10.0 / 3.0));
        assert_eq!(evaluation.stand_home_points, Points::whole(1));
        assert_eq!(evaluation.stand_away_points, Points::ZERO);
    }

    #[test]
    fn test_partial_referee_updates_merge() {
        let settings = ScoringSettings::default();
        let mut evaluation = Evaluation::default();
        let knowledge = EvaluationInput {
            referee: Some(RefereeRatings {
                knowledge: Some(8),
                ..RefereeRatings::default()
            }),
            ..EvaluationInput::default()
        };
        let management = EvaluationInput {
            referee: Some(RefereeRatings {
                management: Some(2),
                ..RefereeRatings::default()
            }),
            ..EvaluationInput::default()
        };

        apply_evaluation(&mut evaluation, &knowledge, &settings).unwrap();
        apply_evaluation(&mut evaluation, &management, &settings).unwrap();

        assert_eq!(evaluation.referee.knowledge, Some(8));
        assert_eq!(evaluation.referee_mean, Some(5.0));
        assert_eq!(evaluation.referee_points, Points::whole(2));
    }

    #[test]
    fn test_partial_stand_update_recomputes_tier() {
        let settings = ScoringSettings::default();
        let mut evaluation = Evaluation::default();
        let first = EvaluationInput {
            stand_away: Some(StandRatings::new(1, 1, 1)),
            ..EvaluationInput::default()
        };
        let second = EvaluationInput {
            stand_away: Some(StandRatings {
                respect: Some(7),
                ..StandRatings::default()
            }),
            ..EvaluationInput::default()
        };

        apply_evaluation(&mut evaluation, &first, &settings).unwrap();
        assert_eq!(evaluation.stand_away_points, Points::ZERO);
        apply_evaluation(&mut evaluation, &second, &settings).unwrap();
        assert_eq!(evaluation.stand_away_mean, Some(3.0));
        assert_eq!(evaluation.stand_away_points, Points::HALF);
    }

    #[test]
    fn test_empty_referee_input_keeps_points() {
        let settings = ScoringSettings::default();
        let mut evaluation = Evaluation::default();
        let rated = EvaluationInput {
            referee: Some(RefereeRatings::new(6, 6, 6)),
            ..EvaluationInput::default()
        };
        apply_evaluation(&mut evaluation, &rated, &settings).unwrap();

        let empty = EvaluationInput {
            referee: Some(RefereeRatings::default()),
            ..EvaluationInput::default()
        };
        apply_evaluation(&mut evaluation, &empty, &settings).unwrap();
        assert_eq!(evaluation.referee_mean, Some(6.0));
        assert_eq!(evaluation.referee_points, Points::whole(2));
    }
}
