//! Play command - Interactive game against the engine on stdin/stdout

use std::{
    fs::File,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use super::rng_from_seed;
use crate::{
    FirstPlayer, MemoScope, Settings,
    cli::output::{farewell, render_board, status_label},
    search::SearchEngine,
    tictactoe::{Game, Player},
};

const INVALID_MOVE: &str = "Invalid move, please play again";

#[derive(Parser, Debug)]
#[command(about = "Play a game against the engine")]
pub struct PlayArgs {
    /// Who moves first
    #[arg(long, value_enum)]
    pub first: Option<FirstPlayer>,

    /// Random seed for the toss
    #[arg(long)]
    pub seed: Option<u64>,

    /// How long the engine keeps memoized positions
    #[arg(long, value_enum)]
    pub memo_scope: Option<MemoScope>,

    /// Write the finished game as JSON
    #[arg(long)]
    pub transcript: Option<PathBuf>,
}

pub fn execute(args: PlayArgs, settings: &Settings) -> Result<()> {
    let first = args.first.unwrap_or(settings.game.first_player);
    let engine_config = settings
        .engine
        .with_memo_scope(args.memo_scope.unwrap_or(settings.engine.memo_scope));

    let game = match first.fixed() {
        Some(player) => Game::new(player),
        None => Game::with_toss(&mut rng_from_seed(args.seed.or(settings.game.seed))),
    };
    info!(first = %game.first_player(), memo_scope = ?engine_config.memo_scope, "starting game");

    let mut engine = SearchEngine::new(engine_config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let game = run_session(game, &mut engine, stdin.lock(), stdout.lock())?;

    if let Some(path) = &args.transcript {
        let file = File::create(path)
            .with_context(|| format!("failed to create transcript {}", path.display()))?;
        serde_json::to_writer_pretty(file, &game)?;
        println!("Transcript written to: {}", path.display());
    }

    Ok(())
}

/// Drive `game` to completion, reading human moves from `input`.
///
/// Moves are typed as `row col`, 1-based. Unparseable, occupied and
/// off-grid moves are reported and asked for again.
pub fn run_session<R: BufRead, W: Write>(
    mut game: Game,
    engine: &mut SearchEngine,
    mut input: R,
    mut output: W,
) -> Result<Game> {
    writeln!(output, "HUMAN: X  BOT: O")?;
    match game.next_player() {
        Player::Human => writeln!(output, "You get to start!")?,
        Player::Bot => writeln!(output, "I'm thinking")?,
    }

    while !game.is_over() {
        match game.next_player() {
            Player::Human => {
                writeln!(output, "\n{}", render_board(game.board()))?;
                read_human_move(&mut game, &mut input, &mut output)?;
            }
            Player::Bot => {
                let decision = game.play_bot(engine)?;
                writeln!(
                    output,
                    "Bot plays {} {}",
                    decision.position.row + 1,
                    decision.position.col + 1
                )?;
            }
        }
        writeln!(
            output,
            "Next player : {} Game status : {}",
            game.next_player(),
            status_label(game.status())
        )?;
    }

    writeln!(output, "\n{}", render_board(game.board()))?;
    let winning_line = game
        .board()
        .winner()
        .and_then(|winner| game.board().winning_line(winner));
    if let Some(line) = winning_line {
        let cells: Vec<String> = line
            .iter()
            .map(|p| format!("{} {}", p.row + 1, p.col + 1))
            .collect();
        writeln!(output, "Winning line: {}", cells.join(", "))?;
    }
    writeln!(output, "{}", farewell(game.status()))?;
    Ok(game)
}

fn read_human_move<R: BufRead, W: Write>(
    game: &mut Game,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        write!(output, "Your move (row col): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the game finished");
        }

        let Some((row, col)) = parse_move(&line) else {
            writeln!(output, "{INVALID_MOVE}")?;
            continue;
        };
        match game.play_human(row, col) {
            Ok(_) => return Ok(()),
            Err(err) if err.is_recoverable() => {
                tracing::debug!(%err, "rejected human move");
                writeln!(output, "{INVALID_MOVE}")?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}

/// Parse `"row col"` (1-based, space or comma separated) into zero-based coordinates
fn parse_move(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row.checked_sub(1)?, col.checked_sub(1)?))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::tictactoe::{GameStatus, Position};

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("1 1\n"), Some((0, 0)));
        assert_eq!(parse_move("3,2"), Some((2, 1)));
        assert_eq!(parse_move(" 2   3 "), Some((1, 2)));
        assert_eq!(parse_move("0 1"), None);
        assert_eq!(parse_move("1"), None);
        assert_eq!(parse_move("1 2 3"), None);
        assert_eq!(parse_move("a b"), None);
        // off-grid but well-formed; the board rejects it
        assert_eq!(parse_move("4 1"), Some((3, 0)));
    }

    #[test]
    fn test_bot_blocks_and_wins_scripted_session() {
        // human takes the top row corners, bot must block at 1 2
        let script = "1 1\n1 3\n3 1\n2 1\n3 3\n";
        let mut engine = SearchEngine::default();
        let mut output = Vec::new();
        let game = run_session(
            Game::new(Player::Human),
            &mut engine,
            Cursor::new(script),
            &mut output,
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("HUMAN: X  BOT: O\nYou get to start!"));
        assert_eq!(game.moves()[1].position, Position::new(1, 1));
        assert_eq!(game.moves()[3].position, Position::new(0, 1));
        assert_eq!(game.status(), GameStatus::Won(Player::Bot));
        assert!(text.contains("Sorry, you lost"));
    }

    #[test]
    fn test_invalid_input_is_reprompted() {
        let script = "9 9\nhello\n1 1\n2 2\n";
        let mut engine = SearchEngine::default();
        let mut output = Vec::new();
        let err = run_session(
            Game::new(Player::Human),
            &mut engine,
            Cursor::new(script),
            &mut output,
        )
        .unwrap_err();

        let text = String::from_utf8(output).unwrap();
        // off-grid, unparseable, then the centre the bot already took
        assert_eq!(text.matches(INVALID_MOVE).count(), 3);
        assert!(err.to_string().contains("input closed"));
    }

    #[test]
    fn test_bot_opening_session_announces_thinking() {
        let script = "1 1\n1 2\n1 3\n2 1\n2 2\n2 3\n3 1\n3 2\n3 3\n";
        let mut engine = SearchEngine::default();
        let mut output = Vec::new();
        let game = run_session(
            Game::new(Player::Bot),
            &mut engine,
            Cursor::new(script),
            &mut output,
        )
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("I'm thinking"));
        assert!(text.contains(farewell(game.status())));
        assert_ne!(game.status(), GameStatus::Won(Player::Human));
    }
}
