use std::collections::HashMap;

use crate::domain::{OutcomeKind, SportConfig};
use crate::errors::{EngineError, EngineResult};

/// Built-in sport catalog
pub fn get_sports() -> Vec<SportConfig> {
    vec![
        SportConfig::new("football", "Football", OutcomeKind::Goals, true),
        SportConfig::new("handball", "Handball", OutcomeKind::Goals, true),
        SportConfig::new("floorball", "Floorball", OutcomeKind::Goals, true),
        SportConfig::new("goalball", "Goalball", OutcomeKind::Goals, true),
        SportConfig::new("badminton", "Badminton", OutcomeKind::Sets, false),
        SportConfig::new("volleyball", "Volleyball", OutcomeKind::Sets, true),
        SportConfig::new("sitting_volleyball", "Sitting Volleyball", OutcomeKind::Sets, true),
        SportConfig::new("basketball", "Basketball", OutcomeKind::Points, false),
        SportConfig::new("colpball", "Colpball", OutcomeKind::Points, true),
        SportConfig::new("ultimate", "Ultimate Frisbee", OutcomeKind::Points, true),
        SportConfig::new("kinball", "Kin-Ball", OutcomeKind::Points, true),
        SportConfig::new("spikeball", "Spikeball", OutcomeKind::Points, false),
        SportConfig::new("rugby_tag", "Rugby Tag", OutcomeKind::Tries, true),
        SportConfig::new("rounders", "Rounders", OutcomeKind::Runs, true),
        SportConfig::new("towertouchball", "TowerTouchball", OutcomeKind::TowerCapture, true),
        SportConfig::new("generic", "Generic", OutcomeKind::Generic, true),
    ]
}

/// Sport lookup by code
#[derive(Debug, Clone)]
pub struct SportCatalog {
    sports: HashMap<String, SportConfig>,
}

impl SportCatalog {
    pub fn new(sports: Vec<SportConfig>) -> Self {
        let sports = sports
            .into_iter()
            .map(|sport| (sport.code.clone(), sport))
            .collect();
        Self { sports }
    }

    pub fn builtin() -> Self {
        Self::new(get_sports())
    }

    pub fn get(&self, code: &str) -> EngineResult<&SportConfig> {
        self.sports
            .get(code)
            .ok_or_else(|| EngineError::UnknownSportConfig(code.to_string()))
    }

    /// Sports sorted by code
    pub fn list(&self) -> Vec<&SportConfig> {
        let mut sports: Vec<&SportConfig> = self.sports.values().collect();
        sports.sort_by(|a, b| a.code.cmp(&b.code));
        sports
    }
}

impl Default for SportCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
