use anyhow::Result;

use league_engine::cli::Command;
use league_engine::{
    evaluation_input, handle_backup, handle_badges, handle_completions, handle_evaluate,
    handle_generate, handle_import, handle_init, handle_matches, handle_restore, handle_score,
    handle_sports, handle_standings, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Init { mode } => handle_init(*mode),
        Command::Import { file } => handle_import(file),
        Command::Generate { round, sport } => handle_generate(*round, sport),
        Command::Matches { round } => handle_matches(*round),
        Command::Score { match_id, payload } => handle_score(*match_id, payload),
        Command::Evaluate {
            match_id,
            referee,
            stand_home,
            stand_away,
            fair_play_home,
            fair_play_away,
        } => {
            let input = evaluation_input(
                referee.as_deref(),
                stand_home.as_deref(),
                stand_away.as_deref(),
                *fair_play_home,
                *fair_play_away,
            )?;
            handle_evaluate(*match_id, &input)
        }
        Command::Standings { export } => handle_standings(export.as_deref()),
        Command::Backup { name, dir } => handle_backup(dir, name),
        Command::Restore { name, dir } => handle_restore(dir, name),
        Command::Badges { team } => handle_badges(*team),
        Command::Sports => handle_sports(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
