//! Minimax scores from the bot's point of view

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Player;

/// Magnitude of a win reached immediately.
///
/// Must exceed the deepest possible search (9 plies) so that every win
/// outranks every draw and every draw outranks every loss.
pub const MAX_SCORE: i32 = 10;

/// Outcome score: positive favours the bot, negative favours the human.
///
/// A win reached `d` plies away scores `MAX_SCORE - d`, a loss scores
/// `-MAX_SCORE + d`, and a draw scores `0` at any depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    pub const DRAW: Score = Score(0);
    pub const BOT_WIN: Score = Score(MAX_SCORE);
    pub const HUMAN_WIN: Score = Score(-MAX_SCORE);

    pub fn value(self) -> i32 {
        self.0
    }

    /// Score of a terminal position won by `player`
    pub fn win_for(player: Player) -> Score {
        match player {
            Player::Bot => Score::BOT_WIN,
            Player::Human => Score::HUMAN_WIN,
        }
    }

    /// The same outcome seen from `plies` moves further up the tree.
    ///
    /// Wins and losses move towards zero by one per ply; draws stay put.
    #[must_use]
    pub fn deepened(self, plies: usize) -> Score {
        let plies = plies as i32;
        match self.0 {
            v if v > 0 => Score(v - plies),
            v if v < 0 => Score(v + plies),
            _ => self,
        }
    }

    /// Whether `self` is strictly better than `other` for `mover`
    pub fn improves_on(self, other: Score, mover: Player) -> bool {
        match mover {
            Player::Bot => self > other,
            Player::Human => self < other,
        }
    }

    /// Winner under optimal play, or `None` for a forced draw
    pub fn predicted_winner(self) -> Option<Player> {
        match self.0 {
            v if v > 0 => Some(Player::Bot),
            v if v < 0 => Some(Player::Human),
            _ => None,
        }
    }

    /// Plies until the predicted win is reached; `None` for draws
    pub fn plies_to_win(self) -> Option<usize> {
        (self.0 != 0).then(|| (MAX_SCORE - self.0.abs()) as usize)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}
