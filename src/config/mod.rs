pub mod settings;
pub mod sports;

pub use settings::{AppConfig, BadgeSettings, ScoringSettings, SchedulingSettings};
pub use sports::{SportCatalog, get_sports};
