//! Game state and the turn sequencer.

pub mod manager;
pub mod state;
pub mod turn;

pub use manager::GameManager;
pub use state::{Game, PLAYER_COUNT};
pub use turn::{ActionReport, ControlSignal, Intent, TurnOutcome, TurnPhase, TurnStart};
