//! Game configuration.
//!
//! Hosts build a `GameConfig` at startup and hand it to `Game::new`.
//! Everything has a default matching the standard table game:
//!
//! | field                | default |
//! |----------------------|---------|
//! | `rows` x `cols`      | 5 x 5   |
//! | `workers_per_player` | 2       |
//! | `hidden_cells`       | 2       |
//! | `max_hidden_reveals` | 2       |
//! | `hidden_bonus_secs`  | 10      |
//! | `starting_time_secs` | 900     |
//! | `triton_chain_limit` | none    |

use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board height.
    pub rows: i32,

    /// Board width.
    pub cols: i32,

    /// Workers each player places at setup.
    pub workers_per_player: u8,

    /// Hidden cells marked at setup.
    pub hidden_cells: usize,

    /// Game-wide cap on hidden-cell reveals.
    pub max_hidden_reveals: u32,

    /// Seconds added to a player's clock per reveal.
    pub hidden_bonus_secs: u32,

    /// Seconds on each player's clock at the start.
    pub starting_time_secs: u32,

    /// Cap on consecutive Triton extra moves per turn. `None` is unbounded.
    pub triton_chain_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            workers_per_player: 2,
            hidden_cells: 2,
            max_hidden_reveals: 2,
            hidden_bonus_secs: 10,
            starting_time_secs: 15 * 60,
            triton_chain_limit: None,
        }
    }
}

impl GameConfig {
    /// Square board of the given size, other fields default.
    #[must_use]
    pub fn with_board_size(mut self, size: i32) -> Self {
        self.rows = size;
        self.cols = size;
        self
    }

    /// Rectangular board.
    #[must_use]
    pub fn with_dimensions(mut self, rows: i32, cols: i32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    #[must_use]
    pub fn with_workers_per_player(mut self, count: u8) -> Self {
        self.workers_per_player = count;
        self
    }

    #[must_use]
    pub fn with_hidden_cells(mut self, count: usize) -> Self {
        self.hidden_cells = count;
        self
    }

    #[must_use]
    pub fn with_max_hidden_reveals(mut self, cap: u32) -> Self {
        self.max_hidden_reveals = cap;
        self
    }

    #[must_use]
    pub fn with_hidden_bonus_secs(mut self, secs: u32) -> Self {
        self.hidden_bonus_secs = secs;
        self
    }

    #[must_use]
    pub fn with_starting_time_secs(mut self, secs: u32) -> Self {
        self.starting_time_secs = secs;
        self
    }

    #[must_use]
    pub fn with_triton_chain_limit(mut self, limit: u32) -> Self {
        self.triton_chain_limit = Some(limit);
        self
    }

    /// Reject configurations no game can be built from.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(SetupError::InvalidBoardSize {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.workers_per_player == 0 {
            return Err(SetupError::NoWorkers);
        }
        Ok(())
    }
}
