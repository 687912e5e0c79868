//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MoveRejection;

/// Side length of the grid
pub const SIZE: usize = 3;

/// Number of cells on the grid
pub const CELLS: usize = SIZE * SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    fn to_byte(self) -> u8 {
        self.to_char() as u8
    }
}

/// A participant in the game
///
/// The human always plays `X` and the automated player always plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Bot,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Bot,
            Player::Bot => Player::Human,
        }
    }

    /// The mark this player writes on the board
    pub fn to_cell(self) -> Cell {
        match self {
            Player::Human => Cell::X,
            Player::Bot => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Bot => write!(f, "bot"),
        }
    }
}

/// A coordinate on the grid, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position for a row-major index in `0..9`
    pub fn from_index(index: usize) -> Self {
        Self {
            row: index / SIZE,
            col: index % SIZE,
        }
    }

    /// Row-major index, or `None` when the coordinate is off the grid
    pub fn index(self) -> Option<usize> {
        (self.row < SIZE && self.col < SIZE).then_some(self.row * SIZE + self.col)
    }

    /// Whether this is one of the four corners
    pub fn is_corner(self) -> bool {
        (self.row == 0 || self.row == SIZE - 1) && (self.col == 0 || self.col == SIZE - 1)
    }

    /// Whether this is the middle cell
    pub fn is_center(self) -> bool {
        self.row == 1 && self.col == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Exact memo key: the mover's marker followed by the nine cells in row-major order.
///
/// Two fingerprints are equal exactly when both the mover and every cell agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; CELLS + 1]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; CELLS + 1] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            write!(f, "{}", byte as char)?;
        }
        Ok(())
    }
}

/// The 3x3 grid of cells
///
/// The board does not track whose turn it is; callers pass the mover
/// explicitly where it matters (placing marks, fingerprinting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELLS],
        }
    }

    /// Build a board directly from its cells in row-major order
    pub fn from_cells(cells: [Cell; CELLS]) -> Self {
        Board { cells }
    }

    /// Create a board from a string representation.
    ///
    /// Whitespace is ignored, so `"XO. .X. ..O"` and a three-line grid both
    /// parse.
    ///
    /// # Errors
    ///
    /// Returns error unless exactly 9 non-whitespace characters remain, or if
    /// any character is not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELLS,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// Read the cell at `(row, col)`
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, crate::Error> {
        let index = Self::checked_index(row, col)?;
        Ok(self.cells[index])
    }

    /// Place `player`'s mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidMove`] when the coordinate is off the grid or the
    /// cell is already taken. The board is left unchanged in both cases.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), crate::Error> {
        let index = Self::checked_index(row, col)?;
        if self.cells[index] != Cell::Empty {
            return Err(crate::Error::InvalidMove {
                row,
                col,
                reason: MoveRejection::Occupied,
            });
        }
        self.cells[index] = player.to_cell();
        Ok(())
    }

    /// Reset a cell back to empty. Only the search retracts marks.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        let index = row * SIZE + col;
        debug_assert_ne!(self.cells[index], Cell::Empty, "cell {index} already empty");
        self.cells[index] = Cell::Empty;
    }

    /// Unchecked placement for the search, which only visits vacant cells
    pub(crate) fn set_index(&mut self, index: usize, player: Player) {
        debug_assert_eq!(self.cells[index], Cell::Empty, "cell {index} already taken");
        self.cells[index] = player.to_cell();
    }

    /// Check if the cell at a row-major index is empty
    pub fn is_vacant(&self, index: usize) -> bool {
        self.cells[index] == Cell::Empty
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        super::lines::LineAnalyzer::has_won(&self.cells, player)
    }

    /// Get the winner if there is one
    ///
    /// The bot is checked first; a legal game never has two winners.
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::Bot) {
            Some(Player::Bot)
        } else if self.has_won(Player::Human) {
            Some(Player::Human)
        } else {
            None
        }
    }

    /// Cells of the first line completed by `player`
    pub fn winning_line(&self, player: Player) -> Option<[Position; 3]> {
        super::lines::LineAnalyzer::winning_line(&self.cells, player)
            .map(|line| line.map(Position::from_index))
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Get all empty positions in row-major order
    pub fn vacant_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Canonical memo key for this board with `mover` to play
    pub fn fingerprint(&self, mover: Player) -> Fingerprint {
        let mut bytes = [0u8; CELLS + 1];
        bytes[0] = mover.to_cell().to_byte();
        for (slot, &cell) in bytes[1..].iter_mut().zip(self.cells.iter()) {
            *slot = cell.to_byte();
        }
        Fingerprint(bytes)
    }

    fn checked_index(row: usize, col: usize) -> Result<usize, crate::Error> {
        Position::new(row, col)
            .index()
            .ok_or(crate::Error::InvalidMove {
                row,
                col,
                reason: MoveRejection::OutOfBounds,
            })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(SIZE) && i < CELLS - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        for &cell in board.cells() {
            assert_eq!(cell, Cell::Empty);
        }
        assert_eq!(board.occupied_count(), 0);
        assert!(!board.is_full());
    }

    #[test]
    fn test_place() {
        let mut board = Board::new();

        board.place(1, 1, Player::Human).unwrap();
        assert_eq!(board.cell_at(1, 1).unwrap(), Cell::X);

        let err = board.place(1, 1, Player::Bot).unwrap_err();
        assert!(err.to_string().contains("occupied"));
        assert_eq!(board.cell_at(1, 1).unwrap(), Cell::X);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::new();
        let err = board.place(3, 0, Player::Human).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::InvalidMove {
                row: 3,
                col: 0,
                reason: MoveRejection::OutOfBounds
            }
        ));
        assert!(board.cell_at(0, 7).is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_clear_restores_empty() {
        let mut board = Board::new();
        board.place(2, 1, Player::Bot).unwrap();
        board.clear(2, 1);
        assert_eq!(board, Board::new());
        board.place(2, 1, Player::Human).unwrap();
        assert_eq!(board.cell_at(2, 1).unwrap(), Cell::X);
    }

    #[test]
    fn test_win_detection_horizontal() {
        let board = Board::from_string("XXX OO. ...").unwrap();
        assert!(board.has_won(Player::Human));
        assert!(!board.has_won(Player::Bot));
        assert_eq!(board.winner(), Some(Player::Human));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_win_detection_diagonal() {
        let board = Board::from_string("OX. XO. X.O").unwrap();
        assert!(board.has_won(Player::Bot));
        assert_eq!(board.winner(), Some(Player::Bot));
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_string("XOX XOO OXX").unwrap();
        assert!(board.is_full());
        assert!(board.is_terminal());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_from_string() {
        let board = Board::from_string("XOX......").unwrap();
        assert_eq!(board.cell_at(0, 0).unwrap(), Cell::X);
        assert_eq!(board.cell_at(0, 1).unwrap(), Cell::O);
        assert_eq!(board.cell_at(0, 2).unwrap(), Cell::X);

        let result = Board::from_string("XO");
        assert!(matches!(
            result,
            Err(crate::Error::InvalidBoardLength { got: 2, .. })
        ));

        let result = Board::from_string("XOZ......");
        assert!(matches!(
            result,
            Err(crate::Error::InvalidCellCharacter {
                character: 'Z',
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_fingerprint_layout() {
        let board = Board::from_string("X.. .O. ...").unwrap();
        assert_eq!(board.fingerprint(Player::Bot).to_string(), "OX...O....");
        assert_eq!(board.fingerprint(Player::Human).to_string(), "XX...O....");
        assert_eq!(Board::new().fingerprint(Player::Bot).as_bytes().len(), 10);
    }

    #[test]
    fn test_vacant_positions_row_major() {
        let board = Board::from_string("X.O .X. OO.").unwrap();
        let vacant = board.vacant_positions();
        assert_eq!(
            vacant,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_position_index_roundtrip() {
        for index in 0..CELLS {
            assert_eq!(Position::from_index(index).index(), Some(index));
        }
        assert_eq!(Position::new(0, 3).index(), None);
        assert!(Position::new(2, 0).is_corner());
        assert!(Position::new(1, 1).is_center());
        assert!(!Position::new(0, 1).is_corner());
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        let display = format!("{board}");
        assert_eq!(display, "XOX\n.O.\nX..");
    }
}
