use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::CompetitionMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Round scheduling and standings for multi-sport school leagues")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Drop and recreate the league database
    Init {
        /// Competition mode: single_sport or multi_sport
        #[arg(short, long, default_value = "single_sport")]
        mode: CompetitionMode,
    },
    /// Load teams, mode and matches from a JSON league file
    Import {
        file: PathBuf,
    },
    /// Generate (or regenerate) one round of matches
    Generate {
        /// 1-based round number
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        round: u32,
        /// Sport code, see `sports`
        #[arg(short, long)]
        sport: String,
    },
    /// List the stored matches of a round
    Matches {
        #[arg(short, long)]
        round: u32,
    },
    /// Record a raw scoreboard and finalize the match
    Score {
        #[arg(short = 'm', long = "match")]
        match_id: i64,
        /// JSON object, e.g. '{"goals_home": 3, "goals_away": 1}'
        #[arg(short, long)]
        payload: String,
    },
    /// Record fair-play, referee and stand ratings of a match
    Evaluate {
        #[arg(short = 'm', long = "match")]
        match_id: i64,
        /// knowledge,management,support (0-10 each)
        #[arg(long, value_delimiter = ',')]
        referee: Option<Vec<u8>>,
        /// encouragement,respect,participation for the home stand (0-10 each)
        #[arg(long = "stand-home", value_delimiter = ',')]
        stand_home: Option<Vec<u8>>,
        /// encouragement,respect,participation for the away stand (0-10 each)
        #[arg(long = "stand-away", value_delimiter = ',')]
        stand_away: Option<Vec<u8>>,
        /// 1 when the home team earned the fair-play point
        #[arg(long = "fair-play-home")]
        fair_play_home: Option<u8>,
        /// 1 when the away team earned the fair-play point
        #[arg(long = "fair-play-away")]
        fair_play_away: Option<u8>,
    },
    /// Print the league table
    Standings {
        /// Also write the table to this JSON file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// Save the league and its standings as JSON snapshots
    Backup {
        name: String,
        #[arg(short, long, default_value = "snapshots")]
        dir: PathBuf,
    },
    /// Load a league saved with `backup`
    Restore {
        name: String,
        #[arg(short, long, default_value = "snapshots")]
        dir: PathBuf,
    },
    /// List the badges a team has earned
    Badges {
        #[arg(short, long)]
        team: i64,
    },
    /// List the built-in sports
    Sports,
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
