//! oxo - Play tic-tac-toe against an engine that never loses
//!
//! Subcommands:
//! - `play`: interactive game on the terminal
//! - `best-move`: show the engine's reply for a given board
//! - `arena`: batch games against a random or engine opponent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use oxo::{
    Settings,
    cli::{
        commands::{arena, best_move, play},
        logging,
    },
};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe against an optimal engine", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log search details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the engine
    Play(play::PlayArgs),

    /// Show the engine's move for a board
    BestMove(best_move::BestMoveArgs),

    /// Run a batch of games against an opponent
    Arena(arena::ArenaArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = Settings::load_or_default(cli.config.as_deref())
        .context("failed to load settings")?;

    match cli.command {
        Commands::Play(args) => play::execute(args, &settings),
        Commands::BestMove(args) => best_move::execute(args, &settings),
        Commands::Arena(args) => arena::execute(args, &settings),
    }
}
