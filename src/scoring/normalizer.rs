use serde_json::Value;

use crate::config::ScoringSettings;
use crate::domain::{MatchDescriptor, Outcome, Points, Scoreboard, SportConfig, SportParams};
use crate::errors::EngineResult;

/// Outcome and 3-2-1 reward derived from one scoreboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedResult {
    pub home_value: i64,
    pub away_value: i64,
    pub outcome: Outcome,
    pub home_points: Points,
    pub away_points: Points,
}

/// Reduces a scoreboard to one comparable value per side.
///
/// Weighted sums saturate at the `i64` bounds instead of wrapping.
pub fn comparable_values(scoreboard: &Scoreboard, params: &SportParams) -> (i64, i64) {
    match scoreboard {
        Scoreboard::Goals(totals)
        | Scoreboard::Sets(totals)
        | Scoreboard::Points(totals)
        | Scoreboard::Runs(totals)
        | Scoreboard::Generic(totals) => (totals.home, totals.away),
        Scoreboard::Tries { home, away } => {
            let value = |line: &crate::domain::TriesLine| {
                line.tries
                    .saturating_mul(params.try_value)
                    .saturating_add(line.conversions.saturating_mul(params.conversion_value))
            };
            (value(home), value(away))
        }
        Scoreboard::TowerCapture { home, away } => {
            let value = |line: &crate::domain::TowerLine| {
                let cones = line.cones.iter().filter(|down| **down).count() as i64;
                line.towers
                    .saturating_mul(params.tower_value)
                    .saturating_add(cones.saturating_mul(params.cone_value))
            };
            (value(home), value(away))
        }
    }
}

/// Equal values are always a draw here; draw policy is enforced elsewhere
pub fn decide_outcome(home_value: i64, away_value: i64) -> Outcome {
    match home_value.cmp(&away_value) {
        std::cmp::Ordering::Greater => Outcome::HomeWin,
        std::cmp::Ordering::Less => Outcome::AwayWin,
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

pub fn reward(outcome: Outcome, settings: &ScoringSettings) -> (Points, Points) {
    match outcome {
        Outcome::HomeWin => (settings.win_points, settings.loss_points),
        Outcome::AwayWin => (settings.loss_points, settings.win_points),
        Outcome::Draw => (settings.draw_points, settings.draw_points),
        Outcome::Pending => (Points::ZERO, Points::ZERO),
    }
}

pub fn normalize(
    scoreboard: &Scoreboard,
    params: &SportParams,
    settings: &ScoringSettings,
) -> NormalizedResult {
    let (home_value, away_value) = comparable_values(scoreboard, params);
    let outcome = decide_outcome(home_value, away_value);
    let (home_points, away_points) = reward(outcome, settings);

    NormalizedResult {
        home_value,
        away_value,
        outcome,
        home_points,
        away_points,
    }
}

/// Parses a legacy payload with the sport's outcome kind, then normalizes it
pub fn normalize_payload(
    sport: &SportConfig,
    payload: &Value,
    settings: &ScoringSettings,
) -> EngineResult<(Scoreboard, NormalizedResult)> {
    let scoreboard = Scoreboard::from_payload(sport.outcome_kind, payload, &sport.params)?;
    let result = normalize(&scoreboard, &sport.params, settings);
    Ok((scoreboard, result))
}

/// Stores the scoreboard and its result on the match and marks it final.
///
/// Safe to call again while the payload is still being edited.
pub fn record_scoreboard(
    game: &mut MatchDescriptor,
    sport: &SportConfig,
    payload: &Value,
    settings: &ScoringSettings,
) -> EngineResult<NormalizedResult> {
    let (scoreboard, result) = normalize_payload(sport, payload, settings)?;

    game.scoreboard = Some(scoreboard);
    game.outcome = result.outcome;
    game.home_points = result.home_points;
    game.away_points = result.away_points;
    game.finalized = true;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SportCatalog;
    use crate::domain::{OutcomeKind, RoleSlots, SideTotals};
    use proptest::prelude::*;
    use serde_json::json;

    fn sport(code: &str) -> SportConfig {
        SportCatalog::builtin().get(code).unwrap().clone()
    }

    #[test]
    fn test_goals_home_win() {
        let payload = json!({"goals_home": 3, "goals_visitor": 1});
        let (_, result) =
            normalize_payload(&sport("football"), &payload, &ScoringSettings::default()).unwrap();
        assert_eq!(result.outcome, Outcome::HomeWin);
        assert_eq!((result.home_points, result.away_points), (Points::whole(3), Points::whole(1)));
    }

    #[test]
    fn test_draw_gives_two_each_even_when_sport_forbids_draws() {
        let badminton = sport("badminton");
        assert!(!badminton.allows_draw);
        let payload = json!({"sets_home": 1, "sets_away": 1});
        let (_, result) = normalize_payload(&badminton, &payload, &ScoringSettings::default()).unwrap();
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.home_points, Points::whole(2));
        assert_eq!(result.away_points, Points::whole(2));
    }

    #[test]
    fn test_tries_weighting() {
        // 1 try + 2 conversions = 9 beats 1 try + 1 conversion = 7
        let payload = json!({
            "tries_home": 1, "conversions_home": 2,
            "tries_away": 1, "conversions_away": 1
        });
        let (_, result) =
            normalize_payload(&sport("rugby_tag"), &payload, &ScoringSettings::default()).unwrap();
        assert_eq!((result.home_value, result.away_value), (9, 7));
        assert_eq!(result.outcome, Outcome::HomeWin);
    }

    #[test]
    fn test_tower_capture_values() {
        let payload = json!({
            "towers_home": 1,
            "towers_away": 0,
            "cone_away_1": true, "cone_away_2": true, "cone_away_3": true, "cone_away_4": true
        });
        let (_, result) = normalize_payload(
            &sport("towertouchball"),
            &payload,
            &ScoringSettings::default(),
        )
        .unwrap();
        assert_eq!((result.home_value, result.away_value), (3, 4));
        assert_eq!(result.outcome, Outcome::AwayWin);
        assert_eq!(result.away_points, Points::whole(3));
        assert_eq!(result.home_points, Points::whole(1));
    }

    #[test]
    fn test_empty_payload_is_a_draw() {
        let (_, result) =
            normalize_payload(&sport("rounders"), &json!({}), &ScoringSettings::default()).unwrap();
        assert_eq!(result.outcome, Outcome::Draw);
    }

    #[test]
    fn test_record_scoreboard_finalizes_match() {
        let mut game = MatchDescriptor::new(1, "football", RoleSlots::playing(1, 2));
        let settings = ScoringSettings::default();
        let football = sport("football");

        record_scoreboard(&mut game, &football, &json!({"goals_home": 0, "goals_away": 1}), &settings)
            .unwrap();
        record_scoreboard(&mut game, &football, &json!({"goals_home": 2, "goals_away": 1}), &settings)
            .unwrap();

        assert!(game.finalized);
        assert_eq!(game.outcome, Outcome::HomeWin);
        assert_eq!(game.scoreboard, Some(Scoreboard::Goals(SideTotals::new(2, 1))));
    }

    #[test]
    fn test_huge_tries_saturate_instead_of_wrapping() {
        let payload = json!({"tries_home": i64::MAX, "conversions_home": i64::MAX, "tries_away": 1});
        let (_, result) =
            normalize_payload(&sport("rugby_tag"), &payload, &ScoringSettings::default()).unwrap();
        assert_eq!(result.home_value, i64::MAX);
        assert_eq!(result.outcome, Outcome::HomeWin);
    }

    #[test]
    fn test_huge_float_towers_still_win() {
        let payload = json!({"towers_home": 1e300, "towers_away": 2});
        let (_, result) = normalize_payload(
            &sport("towertouchball"),
            &payload,
            &ScoringSettings::default(),
        )
        .unwrap();
        assert_eq!(result.home_value, i64::MAX);
        assert_eq!(result.outcome, Outcome::HomeWin);
    }

    #[test]
    fn test_pending_has_no_reward() {
        assert_eq!(
            reward(Outcome::Pending, &ScoringSettings::default()),
            (Points::ZERO, Points::ZERO)
        );
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(home in 0i64..60, away in 0i64..60, kind in 0usize..7) {
            let kinds = [
                OutcomeKind::Goals, OutcomeKind::Sets, OutcomeKind::Points, OutcomeKind::Tries,
                OutcomeKind::Runs, OutcomeKind::TowerCapture, OutcomeKind::Generic,
            ];
            let sport = SportConfig::new("any", "Any", kinds[kind], true);
            let payload = json!({
                "goals_home": home, "goals_away": away,
                "sets_home": home, "sets_away": away,
                "points_home": home, "points_away": away,
                "tries_home": home, "tries_away": away,
                "runs_home": home, "runs_away": away,
                "towers_home": home, "towers_away": away,
                "home": home, "away": away
            });
            let settings = ScoringSettings::default();

            let first = normalize_payload(&sport, &payload, &settings).unwrap();
            let second = normalize_payload(&sport, &payload, &settings).unwrap();
            prop_assert_eq!(&first, &second);

            let result = first.1;
            prop_assert_eq!(result.outcome, decide_outcome(home, away));
            // 3 + 1 or 2 + 2
            prop_assert_eq!(result.home_points + result.away_points, Points::whole(4));
        }
    }
}
