//! Optimal Tic-Tac-Toe engine
//!
//! This crate provides:
//! - A 3x3 board with win, draw and fingerprint queries
//! - An exhaustive minimax search with a memo table that picks the bot's move
//! - A game session that alternates a human and the bot and reports status
//! - A terminal host (`oxo` binary) for playing, analysing and match runs
//!
//! ```
//! use oxo::{
//!     search::SearchEngine,
//!     tictactoe::{Board, Player, Position},
//! };
//!
//! let mut board = Board::from_string("OO. XX. X..").unwrap();
//! let mut engine = SearchEngine::default();
//! let decision = engine.best_move(&mut board, Player::Bot).unwrap();
//! assert_eq!(decision.position, Position::new(0, 2));
//! assert!(board.has_won(Player::Bot));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use config::{EngineConfig, FirstPlayer, GameConfig, Settings};
pub use error::{Error, MoveRejection, Result};
pub use search::{Decision, MemoScope, SearchEngine};
