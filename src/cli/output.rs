//! Output formatting and progress bars for CLI

use std::fmt::Write as _;

use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{Board, GameStatus, Player, SIZE};

/// Create a progress bar for match runs
pub fn create_match_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");
    pb.set_style(style);
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:16} {}", format!("{}:", key), value);
}

/// Render the board with 1-based row and column labels
///
/// ```text
///     1   2   3
/// 1   X | . | O
///    ---+---+---
/// 2   . | X | .
/// ```
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("    1   2   3\n");
    for (row, cells) in board.cells().chunks(SIZE).enumerate() {
        let marks: Vec<String> = cells.iter().map(|c| c.to_char().to_string()).collect();
        let _ = writeln!(out, "{}   {}", row + 1, marks.join(" | "));
        if row + 1 < SIZE {
            out.push_str("   ---+---+---\n");
        }
    }
    out
}

/// Short status label, e.g. `ongoing` or `bot won`
pub fn status_label(status: GameStatus) -> String {
    match status {
        GameStatus::Ongoing => "ongoing".to_string(),
        GameStatus::Draw => "draw".to_string(),
        GameStatus::Won(player) => format!("{player} won"),
    }
}

/// Closing message for a finished game, from the human's point of view
pub fn farewell(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won(Player::Human) => "Congratulations, you won!",
        GameStatus::Won(Player::Bot) => "Sorry, you lost",
        GameStatus::Draw | GameStatus::Ongoing => "That was close! You tied",
    }
}
