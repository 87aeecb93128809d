pub mod evaluation;
pub mod normalizer;

pub use crate::domain::{RefereeRatings, StandRatings, mean_rating};
pub use evaluation::{EvaluationInput, apply_evaluation, evaluate_match, referee_reward, stand_reward};
pub use normalizer::{NormalizedResult, normalize, normalize_payload, record_scoreboard};
