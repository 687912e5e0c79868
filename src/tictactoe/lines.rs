//! The eight three-in-a-row lines of the grid

use super::{Cell, Player, board::CELLS};

/// Row-major cell indices of every line: rows, then columns, then diagonals
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Line queries over a raw cell array
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// True when some line holds three of `player`'s marks
    pub fn has_won(cells: &[Cell; CELLS], player: Player) -> bool {
        Self::winning_line(cells, player).is_some()
    }

    /// The first line completed by `player` in [`WINNING_LINES`] order
    pub fn winning_line(cells: &[Cell; CELLS], player: Player) -> Option<[usize; 3]> {
        let mark = player.to_cell();
        WINNING_LINES
            .into_iter()
            .find(|line| line.iter().all(|&index| cells[index] == mark))
    }
}
