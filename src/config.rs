//! Engine and game settings.
//!
//! Every field has a default, so an empty TOML file (or none at all) is a
//! valid configuration:
//!
//! ```toml
//! [engine]
//! memo_scope = "per-game"
//!
//! [game]
//! first_player = "toss"
//! seed = 7
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    search::MemoScope,
    tictactoe::Player,
};

/// Search engine settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lifetime of memoized positions
    pub memo_scope: MemoScope,
}

impl EngineConfig {
    pub fn with_memo_scope(mut self, memo_scope: MemoScope) -> Self {
        self.memo_scope = memo_scope;
        self
    }
}

/// Who opens the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// Decided by a fair coin
    #[default]
    Toss,
    Human,
    Bot,
}

impl FirstPlayer {
    /// The fixed opener, or `None` when a toss is required
    pub fn fixed(self) -> Option<Player> {
        match self {
            FirstPlayer::Toss => None,
            FirstPlayer::Human => Some(Player::Human),
            FirstPlayer::Bot => Some(Player::Bot),
        }
    }
}

/// Game session settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub first_player: FirstPlayer,
    /// Random seed for the toss and random opponents
    pub seed: Option<u64>,
}

/// Top-level configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub game: GameConfig,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {}", path.display()),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.engine.memo_scope, MemoScope::PerDecision);
        assert_eq!(settings.game.first_player, FirstPlayer::Toss);
        assert_eq!(settings.game.seed, None);
    }

    #[test]
    fn test_full_toml() {
        let settings = Settings::from_toml(
            r#"
            [engine]
            memo_scope = "per-game"

            [game]
            first_player = "bot"
            seed = 7
            "#,
        )
        .unwrap();
        assert_eq!(settings.engine.memo_scope, MemoScope::PerGame);
        assert_eq!(settings.game.first_player.fixed(), Some(Player::Bot));
        assert_eq!(settings.game.seed, Some(7));
    }

    #[test]
    fn test_unknown_scope_rejected() {
        let err = Settings::from_toml("[engine]\nmemo_scope = \"forever\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
