//! Memo table of solved positions

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::score::Score;
use crate::tictactoe::Fingerprint;

/// How long memo entries survive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MemoScope {
    /// Cleared at the start of every move decision
    #[default]
    PerDecision,
    /// Kept across decisions until the engine is reset
    PerGame,
}

/// Solved positions keyed by (mover, board) fingerprint.
///
/// Scores are stored relative to the position they describe, as if it sat at
/// depth zero, so an entry is valid no matter how deep it is found again.
#[derive(Debug, Default)]
pub struct MemoTable {
    entries: HashMap<Fingerprint, Score>,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Fingerprint) -> Option<Score> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: Fingerprint, score: Score) {
        self.entries.insert(key, score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
