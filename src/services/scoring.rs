use anyhow::{Context, Result};
use log::{info, warn};
use rusqlite::TransactionBehavior;
use serde_json::Value;

use crate::config::SportCatalog;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool, matches};
use crate::domain::{MatchDescriptor, MatchId, Outcome};
use crate::errors::EngineError;
use crate::scoring::{EvaluationInput, evaluate_match, record_scoreboard};

/// Records scoreboards and fair-play evaluations of stored matches
pub struct ScoringService {
    config: AppConfig,
    catalog: SportCatalog,
    pool: DbPool,
}

impl ScoringService {
    pub fn new(config: AppConfig, pool: DbPool) -> Self {
        Self {
            config,
            catalog: SportCatalog::builtin(),
            pool,
        }
    }

    /// Normalizes the payload and finalizes the match; may be repeated
    pub fn record_score(&self, match_id: MatchId, payload: &Value) -> Result<MatchDescriptor> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start score transaction")?;

        let mut game = matches::find_by_id(&tx, match_id)?.ok_or(EngineError::UnknownMatch(match_id))?;
        let sport = self.catalog.get(&game.sport)?;
        let result = record_scoreboard(&mut game, sport, payload, &self.config.scoring)?;

        if result.outcome == Outcome::Draw && !sport.allows_draw {
            warn!("{} does not allow draws, match {} recorded as a draw", sport.name, match_id);
        }

        matches::update_result(&tx, &game)?;
        tx.commit().context("Failed to commit score")?;

        info!(
            "Match {} scored {}-{}: {} ({} / {} points)",
            match_id,
            result.home_value,
            result.away_value,
            result.outcome.as_str(),
            result.home_points,
            result.away_points
        );
        Ok(game)
    }

    pub fn record_evaluation(
        &self,
        match_id: MatchId,
        input: &EvaluationInput,
    ) -> Result<MatchDescriptor> {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start evaluation transaction")?;

        let mut game = matches::find_by_id(&tx, match_id)?.ok_or(EngineError::UnknownMatch(match_id))?;
        evaluate_match(&mut game, input, &self.config.scoring)?;

        matches::update_evaluation(&tx, match_id, &game.evaluation)?;
        tx.commit().context("Failed to commit evaluation")?;

        info!(
            "Match {} evaluated: referee {}, stands {} / {}",
            match_id,
            game.evaluation.referee_points,
            game.evaluation.stand_home_points,
            game.evaluation.stand_away_points
        );
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CompetitionMode, Points};
    use crate::scoring::{RefereeRatings, StandRatings};
    use crate::services::SchedulingService;
    use crate::services::testing::seeded_pool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use serde_json::json;

    fn scheduled_league() -> (tempfile::TempDir, ScoringService, Vec<MatchDescriptor>) {
        let (dir, pool) = seeded_pool(6, CompetitionMode::SingleSport);
        let scheduler = SchedulingService::new(AppConfig::new(), pool.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let round = scheduler.generate_with_rng(1, "football", &mut rng).unwrap();
        (dir, ScoringService::new(AppConfig::new(), pool), round)
    }

    #[test]
    fn test_score_is_persisted_and_final() {
        let (_dir, service, round) = scheduled_league();
        let id = round[0].id.unwrap();

        let scored = service.record_score(id, &json!({"goals_home": 3, "goals_visitor": 1})).unwrap();
        assert!(scored.finalized);
        assert_eq!(scored.outcome, Outcome::HomeWin);

        let conn = database::get_connection(&service.pool).unwrap();
        let stored = matches::find_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored, scored);
        assert_eq!((stored.home_points, stored.away_points), (Points::whole(3), Points::whole(1)));
    }

    #[test]
    fn test_score_can_be_corrected() {
        let (_dir, service, round) = scheduled_league();
        let id = round[0].id.unwrap();

        service.record_score(id, &json!({"goals_home": 3, "goals_away": 1})).unwrap();
        let corrected = service.record_score(id, &json!({"goals_home": 1, "goals_away": 1})).unwrap();
        assert_eq!(corrected.outcome, Outcome::Draw);
        assert_eq!(corrected.home_points, Points::whole(2));
    }

    #[test]
    fn test_unknown_match() {
        let (_dir, service, _) = scheduled_league();
        let err = service.record_score(999, &json!({})).unwrap_err();
        assert_eq!(err.downcast_ref::<EngineError>(), Some(&EngineError::UnknownMatch(999)));
    }

    #[test]
    fn test_malformed_payload_changes_nothing() {
        let (_dir, service, round) = scheduled_league();
        let id = round[0].id.unwrap();

        assert!(service.record_score(id, &json!([1, 2])).is_err());

        let conn = database::get_connection(&service.pool).unwrap();
        let stored = matches::find_by_id(&conn, id).unwrap().unwrap();
        assert!(!stored.finalized);
        assert_eq!(stored.scoreboard, None);
    }

    #[test]
    fn test_evaluation_is_persisted() {
        let (_dir, service, round) = scheduled_league();
        let id = round[1].id.unwrap();

        let input = EvaluationInput {
            fair_play_home: Some(1),
            referee: Some(RefereeRatings::new(8, 7, 9)),
            stand_away: Some(StandRatings::new(3, 3, 3)),
            ..EvaluationInput::default()
        };
        let evaluated = service.record_evaluation(id, &input).unwrap();
        assert_eq!(evaluated.evaluation.referee_points, Points::whole(2));
        assert_eq!(evaluated.evaluation.stand_away_points, Points::HALF);

        let conn = database::get_connection(&service.pool).unwrap();
        let stored = matches::find_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.evaluation, evaluated.evaluation);
    }
}
