//! # santorini
//!
//! Rule engine for a two-player tower-building board game with god powers.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: no rendering, input handling or networking. Hosts
//!    drive the game through `GameManager` and read state back.
//!
//! 2. **One source of truth for positions**: workers record a coordinate,
//!    cells record their occupant, and only `Board::relocate` writes both.
//!
//! 3. **Uniform god powers**: every card answers the same two questions
//!    (may I move/build there? did that action grant another one?), so the
//!    turn sequencer never special-cases a card.
//!
//! 4. **Seeded randomness**: setup draws from an injected `GameRng`; the
//!    same seed reproduces the same game.
//!
//! ## Modules
//!
//! - `core`: coordinates, players and workers, RNG, configuration, actions
//! - `board`: cells, towers, the grid and hidden cells
//! - `gods`: god cards and their powers
//! - `rules`: game status and win/loss conditions
//! - `game`: game state and the turn sequencer
//! - `error`: setup and intent errors
//!
//! ## Example
//!
//! ```
//! use santorini::{GameConfig, GameManager, GameRng, Intent, Player, TurnStart};
//! use santorini::game::Game;
//!
//! let mut rng = GameRng::new(7);
//! let mut game = Game::new(vec![Player::new("Ada"), Player::new("Bo")], GameConfig::default()).unwrap();
//! game.initialize_game(santorini::gods::deal(2, &mut rng), &mut rng).unwrap();
//!
//! let mut manager = GameManager::new(game).unwrap();
//! assert!(matches!(manager.start(), TurnStart::Ready(_)));
//!
//! let first = manager.legal_intents()[0];
//! assert!(matches!(first, Intent::SelectWorker(_)));
//! manager.submit(first).unwrap();
//! ```

pub mod board;
pub mod core;
pub mod error;
pub mod game;
pub mod gods;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, BuildAction, Coordinate, GameAction, GameConfig, GameRng,
    MoveAction, Player, PlayerId, PlayerMap, Worker, WorkerId, WorkerRef,
};

pub use crate::board::{Board, Cell, RevealBudget, Tower, HIDDEN_MESSAGES, MAX_LEVEL};

pub use crate::gods::{GodCard, PowerContext, PowerSignal};

pub use crate::rules::{GameResult, GameStatus};

pub use crate::game::{
    ActionReport, ControlSignal, Game, GameManager, Intent, TurnOutcome, TurnPhase, TurnStart,
};

pub use crate::error::{IntentError, SetupError};
