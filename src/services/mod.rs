pub mod import;
pub mod scheduling;
pub mod scoring;
pub mod standings;

pub use import::ImportService;
pub use scheduling::SchedulingService;
pub use scoring::ScoringService;
pub use standings::StandingsService;
