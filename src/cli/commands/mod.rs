//! Subcommands of the `oxo` binary

pub mod arena;
pub mod best_move;
pub mod play;

use anyhow::{Result, anyhow};
use rand::{SeedableRng, rngs::StdRng};

use crate::tictactoe::Player;

/// Parse a player name given on the command line
pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "bot" | "o" | "engine" => Ok(Player::Bot),
        "human" | "x" | "you" => Ok(Player::Human),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'bot' or 'human')"
        )),
    }
}

/// Seeded generator when a seed is given, OS entropy otherwise
pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
