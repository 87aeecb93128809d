use rand::Rng;
use std::collections::HashSet;

use crate::config::SchedulingSettings;
use crate::domain::MatchDescriptor;
use crate::errors::{EngineError, EngineResult};

/// Draws short numeric access codes that are unique within one round
pub struct AccessCodeGenerator {
    round: u32,
    digits: u32,
    max_attempts: usize,
    issued: HashSet<String>,
}

impl AccessCodeGenerator {
    pub fn new(round: u32, settings: &SchedulingSettings) -> Self {
        Self {
            round,
            digits: settings.access_code_digits.clamp(1, 18),
            max_attempts: settings.access_code_max_attempts.max(1),
            issued: HashSet::new(),
        }
    }

    pub fn next_code<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EngineResult<String> {
        let upper = 10u64.pow(self.digits);

        for _ in 0..self.max_attempts {
            let code = format!("{:0width$}", rng.gen_range(0..upper), width = self.digits as usize);
            if self.issued.insert(code.clone()) {
                return Ok(code);
            }
        }

        Err(EngineError::AccessCodesExhausted { round: self.round })
    }

    /// Marks an existing code as taken; false when it already was
    pub fn reserve(&mut self, code: &str) -> bool {
        self.issued.insert(code.to_string())
    }

    pub fn issued(&self) -> usize {
        self.issued.len()
    }
}

/// Keeps the codes a round already carries and draws fresh ones for blanks.
///
/// Every match must belong to `round`.
pub fn fill_access_codes<R: Rng + ?Sized>(
    round: u32,
    games: &mut [MatchDescriptor],
    settings: &SchedulingSettings,
    rng: &mut R,
) -> EngineResult<()> {
    let mut generator = AccessCodeGenerator::new(round, settings);
    for game in games.iter().filter(|g| !g.access_code.is_empty()) {
        if !generator.reserve(&game.access_code) {
            return Err(EngineError::DuplicateAccessCode {
                round,
                code: game.access_code.clone(),
            });
        }
    }
    for game in games.iter_mut().filter(|g| g.access_code.is_empty()) {
        game.access_code = generator.next_code(rng)?;
    }
    Ok(())
}
