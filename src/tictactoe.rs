//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, CELLS, Cell, Fingerprint, Player, Position, SIZE};
pub use game::{Game, GameStatus, Move};
pub use lines::{LineAnalyzer, WINNING_LINES};
