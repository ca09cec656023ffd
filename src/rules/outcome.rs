//! Game status and final results.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Where the game stands. Transitions only go from `Ongoing` to a
/// terminal status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    /// A player won: by climbing to level 3, by the opponent running out
    /// of moves or time, or by resignation.
    PlayerWon,
    /// Ended by mutual agreement, no winner.
    Draw,
}

impl GameStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}
