pub mod structs;

pub use structs::{LeagueSnapshot, Snapshots, read_league_file, write_standings_file};
