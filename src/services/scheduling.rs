use anyhow::{Context, Result};
use log::info;
use rand::Rng;
use rusqlite::TransactionBehavior;

use crate::config::SportCatalog;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool, league, matches, teams};
use crate::domain::MatchDescriptor;
use crate::scheduling::{RoundRequest, generate_round};

/// Generates rounds against the stored roster and history
pub struct SchedulingService {
    config: AppConfig,
    catalog: SportCatalog,
    pool: DbPool,
}

impl SchedulingService {
    pub fn new(config: AppConfig, pool: DbPool) -> Self {
        Self {
            config,
            catalog: SportCatalog::builtin(),
            pool,
        }
    }

    pub fn generate(&self, round: u32, sport: &str) -> Result<Vec<MatchDescriptor>> {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(round, sport, &mut rng)
    }

    /// Replaces `round` in one IMMEDIATE transaction.
    ///
    /// The write lock is taken before history is read, so two regenerations
    /// never interleave and readers see either the old round or the new one.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        round: u32,
        sport: &str,
        rng: &mut R,
    ) -> Result<Vec<MatchDescriptor>> {
        if round == 0 {
            anyhow::bail!("Rounds are numbered from 1");
        }

        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to start round transaction")?;

        let roster = teams::list_all(&tx)?;
        let history = matches::list_all(&tx)?;
        let mode = league::get_mode(&tx)?;
        info!(
            "Generating round {} ({}, {}) for {} teams over {} stored matches",
            round,
            sport,
            mode.as_str(),
            roster.len(),
            history.len()
        );

        let request = RoundRequest::new(round, sport, mode);
        let generated = generate_round(
            &roster,
            &history,
            &request,
            &self.catalog,
            &self.config.scheduling,
            rng,
        )?;

        let stored = matches::replace_round(&tx, round, &generated)?;
        tx.commit().context("Failed to commit round")?;

        info!("  → Round {} stored with {} matches", round, stored.len());
        Ok(stored)
    }

    /// Stored matches of one round, in insertion order
    pub fn round(&self, round: u32) -> Result<Vec<MatchDescriptor>> {
        let conn = database::get_connection(&self.pool)?;
        matches::list_by_round(&conn, round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CompetitionMode;
    use crate::errors::EngineError;
    use crate::services::testing::seeded_pool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(team_count: i64, mode: CompetitionMode) -> (tempfile::TempDir, SchedulingService) {
        let (dir, pool) = seeded_pool(team_count, mode);
        (dir, SchedulingService::new(AppConfig::new(), pool))
    }

    #[test]
    fn test_regenerating_a_round_replaces_it() {
        let (_dir, service) = setup(6, CompetitionMode::SingleSport);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        service.generate_with_rng(1, "football", &mut rng).unwrap();
        let second = service.generate_with_rng(2, "football", &mut rng).unwrap();
        let regenerated = service.generate_with_rng(2, "football", &mut rng).unwrap();

        let conn = database::get_connection(&service.pool).unwrap();
        assert_eq!(matches::list_all(&conn).unwrap().len(), 6);

        let pairs = |games: &[MatchDescriptor]| {
            games.iter().map(|m| m.roles.clone()).collect::<Vec<_>>()
        };
        assert_eq!(pairs(&second), pairs(&regenerated));
    }

    #[test]
    fn test_small_league_plays_all_pairs() {
        let (_dir, service) = setup(4, CompetitionMode::SingleSport);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let stored = service.generate_with_rng(1, "kinball", &mut rng).unwrap();
        assert_eq!(stored.len(), 6);
        assert!(stored.iter().all(|m| m.id.is_some()));
    }

    #[test]
    fn test_engine_errors_leave_round_untouched() {
        let (_dir, service) = setup(6, CompetitionMode::SingleSport);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        service.generate_with_rng(1, "football", &mut rng).unwrap();

        let err = service.generate_with_rng(1, "curling", &mut rng).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::UnknownSportConfig("curling".to_string()))
        );

        assert_eq!(service.round(1).unwrap().len(), 3);
        assert!(service.round(2).unwrap().is_empty());
    }

    #[test]
    fn test_round_zero_is_rejected() {
        let (_dir, service) = setup(6, CompetitionMode::SingleSport);
        assert!(service.generate(0, "football").is_err());
    }
}
