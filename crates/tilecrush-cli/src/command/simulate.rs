use std::{cmp::Reverse, path::PathBuf};

use log::info;
use rand::Rng;
use serde::Serialize;
use tilecrush_engine::{GameSession, Grid, Position, SessionSeed, SessionStats};

use crate::{command::SessionArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    pub(super) session: SessionArg,
    /// Maximum number of moves to play
    #[clap(long, default_value_t = 100)]
    clicks: usize,
    /// Write the summary to this file instead of stdout
    #[clap(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Move {
    Click { position: Position },
    Tool { position: Position },
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: Option<SessionSeed>,
    clicks: usize,
    moves: Vec<Move>,
    /// Whether the session ran out of moves before the click limit.
    exhausted: bool,
    stats: SessionStats,
    tools_left: u32,
    grid: Vec<String>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        session,
        clicks,
        output,
    } = arg;

    util::init_logger(&session.log_file)?;
    let mut session = session.new_session();

    let moves = play_greedy(&mut session, *clicks);
    info!(
        "simulation finished after {} move(s) with score {}",
        moves.len(),
        session.score()
    );

    let summary = Summary {
        seed: session.seed(),
        clicks: moves.len(),
        exhausted: moves.len() < *clicks,
        moves,
        stats: session.stats().clone(),
        tools_left: session.tool_inventory(),
        grid: session.grid().to_rows(),
    };
    util::save_json(&summary, output.as_ref())
}

/// Plays up to `limit` greedy moves and returns the moves made.
fn play_greedy<R>(session: &mut GameSession<R>, limit: usize) -> Vec<Move>
where
    R: Rng,
{
    let mut moves = Vec::new();
    while moves.len() < limit {
        let Some(mv) = choose_move(session) else {
            break;
        };
        let outcome = match mv {
            Move::Click { position } => session.on_cell_clicked(position),
            Move::Tool { position } => session.use_tool(position),
        };
        debug_assert!(outcome.report().is_some(), "{mv:?} did not remove tiles");
        moves.push(mv);
    }
    moves
}

/// Picks the click with the highest immediate score, or a tool use on the
/// most valuable tile when no group can be eliminated.
///
/// Ties go to the smallest position.
fn choose_move<R>(session: &GameSession<R>) -> Option<Move>
where
    R: Rng,
{
    let best_click = Grid::positions()
        .filter_map(|pos| session.preview(pos).map(|a| (a.points, pos)))
        .max_by_key(|&(points, pos)| (points, Reverse(pos)));
    if let Some((_, position)) = best_click {
        return Some(Move::Click { position });
    }

    if session.tool_inventory() == 0 {
        return None;
    }
    session
        .grid()
        .cells()
        .filter_map(|(pos, tile)| tile.map(|t| (t.points_per_tile(), pos)))
        .max_by_key(|&(points, pos)| (points, Reverse(pos)))
        .map(|(_, position)| Move::Tool { position })
}
