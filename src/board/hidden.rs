//! Hidden cells: one-time time bonuses buried in the board.
//!
//! At setup a few empty ground cells are marked hidden, each carrying a
//! message from a fixed pool. The first worker to step on one reveals
//! it, provided the game-wide `RevealBudget` is not spent.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use super::grid::Board;
use crate::core::GameRng;
use crate::error::SetupError;

/// Messages handed out in rotation (`i mod len`).
pub const HIDDEN_MESSAGES: [&str; 5] = [
    "You found an ancient blessing! +10 seconds granted.",
    "The gods smile upon you! Time flows slower now.",
    "A divine gift has been bestowed upon you!",
    "The spirits of Santorini aid your cause!",
    "Ancient magic flows through this sacred ground!",
];

impl Board {
    /// Mark `count` random empty ground cells as hidden.
    ///
    /// Runs once per board: later calls change nothing and return 0.
    /// Call after workers are placed so no hidden cell starts occupied.
    pub fn create_hidden_cells(
        &mut self,
        count: usize,
        rng: &mut GameRng,
    ) -> Result<usize, SetupError> {
        if self.hidden_cells_created() {
            return Ok(0);
        }

        let available = self.empty_ground_cells();
        if available.len() < count {
            return Err(SetupError::NotEnoughSpace {
                needed: count,
                available: available.len(),
            });
        }

        let chosen = rng.sample(&available, count);
        for (i, at) in chosen.iter().enumerate() {
            if let Some(cell) = self.cell_mut(*at) {
                cell.hide(HIDDEN_MESSAGES[i % HIDDEN_MESSAGES.len()]);
            }
        }

        self.mark_hidden_cells_created();
        log::debug!("marked {} hidden cells", chosen.len());
        Ok(chosen.len())
    }

    /// All hidden cells, revealed or not.
    pub fn hidden_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells().filter(|cell| cell.is_hidden())
    }
}

/// Game-wide cap on hidden-cell reveals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealBudget {
    revealed: u32,
    cap: u32,
}

impl RevealBudget {
    #[must_use]
    pub fn new(cap: u32) -> Self {
        Self { revealed: 0, cap }
    }

    /// Reveals so far.
    #[must_use]
    pub fn revealed(&self) -> u32 {
        self.revealed
    }

    #[must_use]
    pub fn cap(&self) -> u32 {
        self.cap
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.cap
    }

    /// Reveal `cell` if it is hidden, unrevealed and the budget allows.
    ///
    /// Once the budget is spent the cell is left untouched.
    pub(crate) fn try_reveal(&mut self, cell: &mut Cell) -> Option<String> {
        if self.is_exhausted() {
            return None;
        }
        let message = cell.reveal_hidden()?;
        self.revealed += 1;
        Some(message)
    }
}
