//! Arena command - Pit the engine against an opponent over many games

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use indicatif::ProgressBar;
use rand::{prelude::IndexedRandom, rngs::StdRng};
use serde::Serialize;
use tracing::info;

use super::rng_from_seed;
use crate::{
    MemoScope, Settings,
    cli::output::{create_match_progress, print_kv, print_section},
    search::SearchEngine,
    tictactoe::{Board, Game, GameStatus, Player, Position},
};

#[derive(Parser, Debug)]
#[command(about = "Play the engine against an opponent")]
pub struct ArenaArgs {
    /// Number of games; openers alternate, the human side starts the first
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Opponent for the human side (`random` or `engine`)
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// How long the engine keeps memoized positions
    #[arg(long, value_enum)]
    pub memo_scope: Option<MemoScope>,

    /// Export the tally to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Something that can play the human side
pub trait Opponent {
    /// Choose a vacant cell on a board that is not yet decided
    fn select_move(&mut self, board: &Board) -> Result<Position>;

    fn name(&self) -> &str;
}

/// Uniformly random legal moves
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Opponent for RandomOpponent {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        board
            .vacant_positions()
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("no vacant cell left"))
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// A second engine playing the human side
pub struct EngineOpponent {
    engine: SearchEngine,
}

impl EngineOpponent {
    pub fn new(engine: SearchEngine) -> Self {
        Self { engine }
    }
}

impl Opponent for EngineOpponent {
    fn select_move(&mut self, board: &Board) -> Result<Position> {
        // search on a scratch copy; the game commits the move itself
        let mut scratch = *board;
        let decision = self.engine.best_move(&mut scratch, Player::Human)?;
        Ok(decision.position)
    }

    fn name(&self) -> &str {
        "engine"
    }
}

/// Results from the bot's point of view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchTally {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl MatchTally {
    fn record(&mut self, status: GameStatus) {
        self.games += 1;
        match status {
            GameStatus::Won(Player::Bot) => self.wins += 1,
            GameStatus::Won(Player::Human) => self.losses += 1,
            GameStatus::Draw | GameStatus::Ongoing => self.draws += 1,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 / self.games as f64
        }
    }
}

/// Play `games` games of `engine` (bot) against `opponent` (human side)
pub fn run_match(
    engine: &mut SearchEngine,
    opponent: &mut dyn Opponent,
    games: usize,
    progress: Option<&ProgressBar>,
) -> Result<MatchTally> {
    let mut tally = MatchTally::default();

    for index in 0..games {
        let first = if index % 2 == 0 {
            Player::Human
        } else {
            Player::Bot
        };
        let mut game = Game::new(first);
        engine.reset();

        while !game.is_over() {
            match game.next_player() {
                Player::Bot => {
                    game.play_bot(engine)?;
                }
                Player::Human => {
                    let position = opponent.select_move(game.board())?;
                    game.play_human(position.row, position.col)?;
                }
            }
        }

        tally.record(game.status());
        if let Some(pb) = progress {
            pb.inc(1);
            pb.set_message(format!("{}W {}D {}L", tally.wins, tally.draws, tally.losses));
        }
    }

    Ok(tally)
}

pub fn execute(args: ArenaArgs, settings: &Settings) -> Result<()> {
    let seed = args.seed.or(settings.game.seed);
    let engine_config = settings
        .engine
        .with_memo_scope(args.memo_scope.unwrap_or(settings.engine.memo_scope));

    let mut opponent: Box<dyn Opponent> = match args.opponent.to_lowercase().as_str() {
        "random" => Box::new(RandomOpponent::new(rng_from_seed(seed))),
        "engine" => Box::new(EngineOpponent::new(SearchEngine::new(engine_config))),
        other => {
            return Err(anyhow!(
                "Unknown opponent type: '{other}'. Supported: random, engine"
            ));
        }
    };

    print_section("Arena");
    print_kv("opponent", opponent.name());
    print_kv("games", &args.games.to_string());
    print_kv("memo scope", &format!("{:?}", engine_config.memo_scope));
    if let Some(seed) = seed {
        print_kv("seed", &seed.to_string());
    }

    let mut engine = SearchEngine::new(engine_config);
    let pb = create_match_progress(args.games as u64);
    let tally = run_match(&mut engine, opponent.as_mut(), args.games, Some(&pb))?;
    pb.finish_and_clear();
    info!(?tally, opponent = opponent.name(), "arena finished");

    print_section("Results");
    print_kv(
        "bot wins",
        &format!("{} ({:.1}%)", tally.wins, tally.rate(tally.wins) * 100.0),
    );
    print_kv(
        "draws",
        &format!("{} ({:.1}%)", tally.draws, tally.rate(tally.draws) * 100.0),
    );
    print_kv(
        "bot losses",
        &format!("{} ({:.1}%)", tally.losses, tally.rate(tally.losses) * 100.0),
    );

    if let Some(path) = &args.export {
        export_tally(&tally, opponent.name(), seed, path)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn export_tally(
    tally: &MatchTally,
    opponent: &str,
    seed: Option<u64>,
    path: &Path,
) -> Result<()> {
    #[derive(Serialize)]
    struct ArenaExport<'a> {
        opponent: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
        #[serde(flatten)]
        tally: &'a MatchTally,
        win_rate: f64,
        draw_rate: f64,
        loss_rate: f64,
    }

    let export = ArenaExport {
        opponent,
        seed,
        tally,
        win_rate: tally.rate(tally.wins),
        draw_rate: tally.rate(tally.draws),
        loss_rate: tally.rate(tally.losses),
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create export file {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export)?;
    Ok(())
}
