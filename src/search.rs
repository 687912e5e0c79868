//! Move selection by exhaustive minimax with memoization

pub mod engine;
pub mod memo;
pub mod score;

pub use engine::{Decision, SearchEngine, SearchStats};
pub use memo::{MemoScope, MemoTable};
pub use score::{MAX_SCORE, Score};
