//! Exhaustive minimax over the live board

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    memo::{MemoScope, MemoTable},
    score::Score,
};
use crate::{
    Error, Result,
    config::EngineConfig,
    tictactoe::{Board, CELLS, Player, Position},
};

/// Outcome of a top-level move decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub mover: Player,
    pub position: Position,
    pub score: Score,
}

/// Counters for the most recent decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Positions visited, memo hits included
    pub nodes: u64,
    pub memo_hits: u64,
}

/// A hypothetical mark that is taken back when the guard drops.
///
/// Every exit from a branch, early return or unwind included, leaves the
/// cell empty again.
struct Trial<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> Trial<'a> {
    fn place(board: &'a mut Board, index: usize, mover: Player) -> Self {
        board.set_index(index, mover);
        Trial { board, index }
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        let Position { row, col } = Position::from_index(self.index);
        self.board.clear(row, col);
    }
}

/// Minimax searcher with a private memo table.
///
/// The board is explored in place: each branch places a mark, recurses and
/// retracts it, so no board is ever copied. Children are scanned in
/// row-major order and the first of several equally good moves is kept,
/// which makes every decision reproducible.
#[derive(Debug, Default)]
pub struct SearchEngine {
    config: EngineConfig,
    memo: MemoTable,
    stats: SearchStats,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            memo: MemoTable::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Statistics of the last [`best_move`](Self::best_move) call
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of memoized positions currently held
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Forget every memoized position, e.g. between games
    pub fn reset(&mut self) {
        self.memo.clear();
        self.stats = SearchStats::default();
    }

    /// Optimal score with `mover` to play, seen from `depth` plies below the decision point.
    ///
    /// The board is observably unchanged when this returns.
    pub fn evaluate(&mut self, board: &mut Board, mover: Player, depth: usize) -> Score {
        self.solve(board, mover).deepened(depth)
    }

    /// Pick the best move for `mover`, commit it to `board`, and report it.
    ///
    /// # Errors
    ///
    /// [`Error::NoMovesAvailable`] if the board is already won or full; the
    /// board is not touched in that case.
    pub fn best_move(&mut self, board: &mut Board, mover: Player) -> Result<Decision> {
        if board.is_terminal() {
            return Err(Error::NoMovesAvailable);
        }
        if self.config.memo_scope == MemoScope::PerDecision {
            self.memo.clear();
        }
        self.stats = SearchStats::default();

        let mut best: Option<(usize, Score)> = None;
        for index in 0..CELLS {
            if !board.is_vacant(index) {
                continue;
            }
            let score = {
                let mut trial = Trial::place(board, index, mover);
                self.evaluate(&mut trial, mover.opponent(), 0)
            };
            trace!(%mover, position = %Position::from_index(index), %score, "candidate");
            if best.is_none_or(|(_, incumbent)| score.improves_on(incumbent, mover)) {
                best = Some((index, score));
            }
        }

        let (index, score) = best.ok_or(Error::NoMovesAvailable)?;
        let position = Position::from_index(index);
        board.place(position.row, position.col, mover)?;

        debug!(
            %mover,
            %position,
            %score,
            nodes = self.stats.nodes,
            memo_hits = self.stats.memo_hits,
            memo_entries = self.memo.len(),
            "move selected"
        );

        Ok(Decision {
            mover,
            position,
            score,
        })
    }

    /// Score of the position relative to itself (depth zero).
    fn solve(&mut self, board: &mut Board, mover: Player) -> Score {
        self.stats.nodes += 1;

        let key = board.fingerprint(mover);
        if let Some(score) = self.memo.get(&key) {
            self.stats.memo_hits += 1;
            return score;
        }

        if board.has_won(Player::Human) {
            return Score::win_for(Player::Human);
        } else if board.has_won(Player::Bot) {
            return Score::win_for(Player::Bot);
        } else if board.is_full() {
            return Score::DRAW;
        }

        let mut best: Option<Score> = None;
        for index in 0..CELLS {
            if !board.is_vacant(index) {
                continue;
            }
            let child = {
                let mut trial = Trial::place(board, index, mover);
                self.solve(&mut trial, mover.opponent())
            }
            .deepened(1);
            if best.is_none_or(|incumbent| child.improves_on(incumbent, mover)) {
                best = Some(child);
            }
        }

        // a board that is neither won nor full has at least one vacant cell
        let best = best.unwrap_or(Score::DRAW);
        self.memo.insert(key, best);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_trial_restores_on_drop() {
        let mut b = board("X.. ... ..O");
        {
            let trial = Trial::place(&mut b, 4, Player::Bot);
            assert_eq!(trial.cells()[4], crate::tictactoe::Cell::O);
        }
        assert_eq!(b, board("X.. ... ..O"));
    }

    #[test]
    fn test_evaluate_terminal_positions() {
        let mut engine = SearchEngine::default();

        let mut human_won = board("XXX OO. ...");
        assert_eq!(engine.evaluate(&mut human_won, Player::Bot, 3).value(), -7);

        let mut bot_won = board("OOO XX. X..");
        assert_eq!(engine.evaluate(&mut bot_won, Player::Human, 2).value(), 8);

        let mut drawn = board("XOX XOO OXX");
        assert_eq!(engine.evaluate(&mut drawn, Player::Bot, 4), Score::DRAW);
    }

    #[test]
    fn test_evaluate_leaves_board_untouched() {
        let mut engine = SearchEngine::default();
        let mut b = board("X.. .O. ...");
        let before = b;
        let _ = engine.evaluate(&mut b, Player::Human, 0);
        assert_eq!(b, before);
        assert!(engine.memo_len() > 0);
    }

    #[test]
    fn test_best_move_on_terminal_board() {
        let mut engine = SearchEngine::default();

        let mut full = board("XOX XOO OXX");
        assert!(matches!(
            engine.best_move(&mut full, Player::Bot),
            Err(Error::NoMovesAvailable)
        ));

        let mut won = board("XXX OO. ...");
        assert!(matches!(
            engine.best_move(&mut won, Player::Bot),
            Err(Error::NoMovesAvailable)
        ));
        assert_eq!(won, board("XXX OO. ..."));
    }

    #[test]
    fn test_immediate_win_scores_max() {
        let mut engine = SearchEngine::default();
        let mut b = board("OO. XX. ...");
        let decision = engine.best_move(&mut b, Player::Bot).unwrap();
        assert_eq!(decision.position, Position::new(0, 2));
        assert_eq!(decision.score, Score::BOT_WIN);
    }

    #[test]
    fn test_human_mover_minimizes() {
        let mut engine = SearchEngine::default();
        let mut b = board("XX. OO. ...");
        let decision = engine.best_move(&mut b, Player::Human).unwrap();
        assert_eq!(decision.position, Position::new(0, 2));
        assert_eq!(decision.score, Score::HUMAN_WIN);
        assert!(b.has_won(Player::Human));
    }

    #[test]
    fn test_per_decision_scope_clears_memo() {
        let mut engine = SearchEngine::default();
        let mut b = Board::new();
        engine.best_move(&mut b, Player::Bot).unwrap();
        let after_first = engine.memo_len();

        b.place(2, 2, Player::Human).unwrap();
        engine.best_move(&mut b, Player::Bot).unwrap();
        assert!(engine.memo_len() < after_first);
    }

    #[test]
    fn test_stats_count_memo_hits() {
        let mut engine = SearchEngine::default();
        let mut b = Board::new();
        engine.best_move(&mut b, Player::Bot).unwrap();
        let stats = engine.stats();
        assert!(stats.memo_hits > 0);
        assert!(stats.nodes > stats.memo_hits);
    }
}
