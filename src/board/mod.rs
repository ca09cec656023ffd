//! Spatial model: towers, cells, the board grid and hidden cells.
//!
//! The board is an arena of cells addressed by `Coordinate`. Workers
//! point into it by coordinate, cells point back by `WorkerRef`, and
//! `Board::relocate` is the only place either side changes.

pub mod cell;
pub mod grid;
pub mod hidden;
pub mod tower;

pub use cell::Cell;
pub use grid::{Board, Targets};
pub use hidden::{RevealBudget, HIDDEN_MESSAGES};
pub use tower::{Tower, MAX_LEVEL};
