//! Game outcomes and win/loss detection.
//!
//! The turn sequencer calls into these after every move and at the start
//! of every turn. Clock expiry and draw agreements are driven by the
//! host and land in the same terminal statuses.

pub mod conditions;
pub mod outcome;

pub use conditions::{check_lose_condition, check_win_condition, has_valid_moves};
pub use outcome::{GameResult, GameStatus};
