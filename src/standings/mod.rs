pub mod aggregator;
pub mod badges;
pub mod types;

pub use aggregator::{compute_standings, team_row};
pub use badges::{Badge, badges};
pub use types::StandingsRow;
