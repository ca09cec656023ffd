//! Error types.
//!
//! `SetupError` is fatal to construction: no game exists afterwards.
//! `IntentError` rejects a single player intent and leaves the game
//! untouched, so the caller can re-prompt.

use thiserror::Error;

use crate::core::{Coordinate, PlayerId, WorkerId};
use crate::game::TurnPhase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("game requires exactly {expected} players, got {found}")]
    WrongPlayerCount { expected: usize, found: usize },
    #[error("{cards} god cards for {players} players")]
    GodCardCountMismatch { players: usize, cards: usize },
    #[error("player name {0:?} is used twice")]
    DuplicatePlayerName(String),
    #[error("board of {rows}x{cols} is not playable")]
    InvalidBoardSize { rows: i32, cols: i32 },
    #[error("players need at least one worker")]
    NoWorkers,
    #[error("need {needed} empty ground-level cells, only {available} available")]
    NotEnoughSpace { needed: usize, available: usize },
    #[error("tower of level {level} (dome: {dome}) is not allowed")]
    InvalidTower { level: u8, dome: bool },
    #[error("{0} is off the board")]
    OffBoard(Coordinate),
    #[error("{0} is already occupied")]
    CellOccupied(Coordinate),
    #[error("{0} already has a tower")]
    TowerExists(Coordinate),
    #[error("{player} has no worker {}", worker.0)]
    UnknownWorker { player: PlayerId, worker: WorkerId },
    #[error("game is already initialized")]
    AlreadyInitialized,
    #[error("game must be initialized before play")]
    NotInitialized,
    #[error("{0} is capped by a dome")]
    DomedCell(Coordinate),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentError {
    #[error("game is over, no new intents are accepted")]
    GameOver,
    #[error("intent not accepted during {0:?}")]
    OutOfPhase(TurnPhase),
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("no such worker")]
    UnknownWorker,
    #[error("worker belongs to another player")]
    NotYourWorker,
    #[error("no worker selected")]
    NoWorkerSelected,
    #[error("selected worker has no legal move")]
    WorkerHasNoMoves,
    #[error("illegal move to {0}")]
    IllegalMove(Coordinate),
    #[error("illegal build on {0}")]
    IllegalBuild(Coordinate),
    #[error("{0} is ruled out by the active god power")]
    RestrictedByPower(Coordinate),
}
