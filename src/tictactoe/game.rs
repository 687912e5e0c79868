//! High-level game management

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::board::{Board, Player, Position};
use crate::search::{Decision, SearchEngine};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
}

/// Status of a game after the latest move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Draw,
    Won(Player),
}

impl GameStatus {
    /// Status of an arbitrary board
    pub fn of(board: &Board) -> Self {
        for player in [Player::Bot, Player::Human] {
            if board.has_won(player) {
                return GameStatus::Won(player);
            }
        }

        if board.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// A game between a human and the bot, with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    first_player: Player,
    next_player: Player,
    status: GameStatus,
    moves: Vec<Move>,
}

impl Game {
    /// Create a new game with the given opener
    pub fn new(first_player: Player) -> Self {
        Game {
            board: Board::new(),
            first_player,
            next_player: first_player,
            status: GameStatus::Ongoing,
            moves: Vec::new(),
        }
    }

    /// Create a new game whose opener is decided by a fair coin
    pub fn with_toss<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first = if rng.random_bool(0.5) {
            Player::Human
        } else {
            Player::Bot
        };
        Self::new(first)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn first_player(&self) -> Player {
        self.first_player
    }

    pub fn next_player(&self) -> Player {
        self.next_player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Play the human's move at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] once the game has ended
    /// - [`crate::Error::OutOfTurn`] when the bot is to move
    /// - [`crate::Error::InvalidMove`] for occupied or off-grid cells; the
    ///   game is unchanged and the caller may ask again
    pub fn play_human(&mut self, row: usize, col: usize) -> Result<Move, crate::Error> {
        self.ensure_turn(Player::Human)?;
        self.board.place(row, col, Player::Human)?;
        Ok(self.record(Position::new(row, col), Player::Human))
    }

    /// Let `engine` choose and play the bot's move
    ///
    /// # Errors
    ///
    /// [`crate::Error::GameOver`] once the game has ended, or
    /// [`crate::Error::OutOfTurn`] when the human is to move.
    pub fn play_bot(&mut self, engine: &mut SearchEngine) -> Result<Decision, crate::Error> {
        self.ensure_turn(Player::Bot)?;
        let decision = engine.best_move(&mut self.board, Player::Bot)?;
        self.record(decision.position, Player::Bot);
        Ok(decision)
    }

    fn ensure_turn(&self, player: Player) -> Result<(), crate::Error> {
        if self.is_over() {
            return Err(crate::Error::GameOver);
        }
        if self.next_player != player {
            return Err(crate::Error::OutOfTurn {
                expected: self.next_player,
            });
        }
        Ok(())
    }

    fn record(&mut self, position: Position, player: Player) -> Move {
        let mv = Move { position, player };
        self.moves.push(mv);
        self.next_player = player.opponent();
        self.status = GameStatus::of(&self.board);
        trace!(%player, %position, status = ?self.status, "move recorded");
        mv
    }
}
