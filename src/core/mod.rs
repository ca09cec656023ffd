//! Core engine types: coordinates, players and workers, RNG,
//! configuration and actions.

pub mod action;
pub mod config;
pub mod coordinate;
pub mod player;
pub mod rng;

pub use action::{Action, ActionKind, ActionRecord, BuildAction, GameAction, MoveAction};
pub use config::GameConfig;
pub use coordinate::Coordinate;
pub use player::{Player, PlayerId, PlayerMap, Worker, WorkerId, WorkerRef};
pub use rng::GameRng;
