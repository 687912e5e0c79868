//! Best-move command - Ask the engine for its move on a given board

use anyhow::{Context, Result};
use clap::Parser;

use super::parse_player_token;
use crate::{
    MemoScope, Settings,
    cli::output::{print_kv, print_section, render_board},
    search::{Decision, SearchEngine, SearchStats},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Show the engine's move for a board")]
pub struct BestMoveArgs {
    /// Board as nine cells in row-major order, e.g. "X.. .X. OO."
    pub board: String,

    /// Player to move (`bot` or `human`)
    #[arg(long, short = 'm', default_value = "bot")]
    pub mover: String,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: BestMoveArgs, settings: &Settings) -> Result<()> {
    let mover = parse_player_token(&args.mover, "--mover")?;
    let mut board = Board::from_string(&args.board)
        .with_context(|| format!("could not parse board '{}'", args.board))?;
    let before = board;

    // a single decision gains nothing from a longer-lived memo
    let mut engine = SearchEngine::new(settings.engine.with_memo_scope(MemoScope::PerDecision));
    let decision = engine
        .best_move(&mut board, mover)
        .context("the board is already decided")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&Report::new(decision, engine.stats()))?);
        return Ok(());
    }

    print_section("Position");
    println!("{}", render_board(&before));
    print_section("Engine move");
    print_kv("mover", &mover.to_string());
    print_kv(
        "move",
        &format!("{} {}", decision.position.row + 1, decision.position.col + 1),
    );
    print_kv("score", &decision.score.to_string());
    print_kv("prediction", &describe(&decision));
    print_kv("nodes", &engine.stats().nodes.to_string());
    print_kv("memo hits", &engine.stats().memo_hits.to_string());
    println!("\n{}", render_board(&board));
    Ok(())
}

fn describe(decision: &Decision) -> String {
    match (
        decision.score.predicted_winner(),
        decision.score.plies_to_win(),
    ) {
        (Some(winner), Some(0)) => format!("{winner} wins on this move"),
        (Some(winner), Some(plies)) => format!("{winner} wins {plies} plies after this move"),
        _ => "draw with best play".to_string(),
    }
}

#[derive(serde::Serialize)]
struct Report {
    #[serde(flatten)]
    decision: Decision,
    prediction: String,
    stats: SearchStats,
}

impl Report {
    fn new(decision: Decision, stats: SearchStats) -> Self {
        Self {
            prediction: describe(&decision),
            decision,
            stats,
        }
    }
}
