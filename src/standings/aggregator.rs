use log::debug;
use std::collections::HashMap;

use crate::domain::{MatchDescriptor, Outcome, Points, Team, TeamId, sort_roster};

use super::types::StandingsRow;

#[derive(Clone, Copy)]
enum Side {
    Home,
    Away,
}

/// Folds every finalized match into one row per roster team, then ranks.
///
/// Rows that tie on every rank key stay in roster order. Teams outside the
/// roster are skipped.
pub fn compute_standings(roster: &[Team], history: &[MatchDescriptor]) -> Vec<StandingsRow> {
    let mut teams = roster.to_vec();
    sort_roster(&mut teams);

    let mut rows: Vec<StandingsRow> = teams.iter().map(StandingsRow::empty).collect();
    let index: HashMap<TeamId, usize> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.team_id, idx))
        .collect();

    let finalized = history.iter().filter(|m| m.finalized);
    let mut counted = 0;
    for game in finalized {
        credit_match(&mut rows, &index, game);
        counted += 1;
    }

    for row in &mut rows {
        row.finish_totals();
    }
    rank_rows(&mut rows);

    debug!("Standings computed for {} teams from {} finalized matches", rows.len(), counted);
    rows
}

/// Standings line of a single team, rank included
pub fn team_row(
    team_id: TeamId,
    roster: &[Team],
    history: &[MatchDescriptor],
) -> Option<StandingsRow> {
    compute_standings(roster, history)
        .into_iter()
        .find(|row| row.team_id == team_id)
}

fn credit_match(rows: &mut [StandingsRow], index: &HashMap<TeamId, usize>, game: &MatchDescriptor) {
    let roles = &game.roles;

    for side in [Side::Home, Side::Away] {
        let team = match side {
            Side::Home => roles.home,
            Side::Away => roles.away,
        };
        if let Some(&idx) = index.get(&team) {
            credit_side(&mut rows[idx], game, side);
        }
    }

    if let Some(referee) = roles.referee {
        if let Some(&idx) = index.get(&referee) {
            rows[idx].referee += game.evaluation.referee_points;
        }
    }
}

fn credit_side(row: &mut StandingsRow, game: &MatchDescriptor, side: Side) {
    let eval = &game.evaluation;
    let (points, fair_play, stand): (Points, Points, Points) = match side {
        Side::Home => (game.home_points, eval.fair_play_home, eval.stand_home_points),
        Side::Away => (game.away_points, eval.fair_play_away, eval.stand_away_points),
    };

    row.played += 1;
    match (game.outcome, side) {
        (Outcome::HomeWin, Side::Home) | (Outcome::AwayWin, Side::Away) => row.wins += 1,
        (Outcome::HomeWin, Side::Away) | (Outcome::AwayWin, Side::Home) => row.losses += 1,
        (Outcome::Draw, _) => row.draws += 1,
        (Outcome::Pending, _) => {}
    }

    row.competitive += points;
    row.fair_play += fair_play;
    row.stand += stand;
}

fn rank_rows(rows: &mut [StandingsRow]) {
    // stable, so full ties keep roster order
    rows.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
}
