//! Error types for the oxo crate

use std::fmt;

use thiserror::Error;

use crate::tictactoe::Player;

/// Why a move was refused by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// The coordinate lies outside the 3x3 grid
    OutOfBounds,
    /// The target cell already holds a mark
    Occupied,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::OutOfBounds => write!(f, "out of bounds (must be 0-2)"),
            MoveRejection::Occupied => write!(f, "already occupied"),
        }
    }
}

/// Main error type for the oxo crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move: cell ({row}, {col}) is {reason}")]
    InvalidMove {
        row: usize,
        col: usize,
        reason: MoveRejection,
    },

    #[error("no moves available: the board is already decided")]
    NoMovesAvailable,

    #[error("game already over")]
    GameOver,

    #[error("it is {expected}'s turn")]
    OutOfTurn { expected: Player },

    #[error("wrong board length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether a host should re-prompt instead of giving up
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::InvalidMove { .. } | Error::OutOfTurn { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
