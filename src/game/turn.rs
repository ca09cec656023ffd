//! Turn phases, player intents and what the sequencer reports back.

use serde::{Deserialize, Serialize};

use crate::board::Targets;
use crate::core::{Action, Coordinate, PlayerId, WorkerId, WorkerRef};
use crate::gods::PowerSignal;

/// Step within a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Choose which worker acts this turn.
    #[default]
    WorkerSelection,
    /// Move the selected worker.
    MoveSelection,
    /// Build with the selected worker.
    BuildSelection,
    /// Nothing left but ending the turn.
    TurnEnd,
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TurnPhase::WorkerSelection => "worker selection",
            TurnPhase::MoveSelection => "move selection",
            TurnPhase::BuildSelection => "build selection",
            TurnPhase::TurnEnd => "turn end",
        };
        f.write_str(name)
    }
}

/// Something the current player asks to do.
///
/// Move and build targets are for the selected worker; the acting
/// player is always whoever's turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    SelectWorker(WorkerRef),
    Move(Coordinate),
    Build(Coordinate),
    EndTurn,
    /// The opponent's answer to a draw offer.
    ProposeDraw { accepted: bool },
    Resign,
}

/// Control signal as reported to a host.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlSignal {
    SecondMove,
    SecondBuild,
    TritonExtraMove,
    HiddenCellRevealed(String),
}

impl From<PowerSignal> for ControlSignal {
    fn from(signal: PowerSignal) -> Self {
        match signal {
            PowerSignal::SecondMove => ControlSignal::SecondMove,
            PowerSignal::SecondBuild => ControlSignal::SecondBuild,
            PowerSignal::TritonExtraMove => ControlSignal::TritonExtraMove,
        }
    }
}

impl std::fmt::Display for ControlSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlSignal::SecondMove => f.write_str(PowerSignal::SecondMove.as_str()),
            ControlSignal::SecondBuild => f.write_str(PowerSignal::SecondBuild.as_str()),
            ControlSignal::TritonExtraMove => f.write_str(PowerSignal::TritonExtraMove.as_str()),
            ControlSignal::HiddenCellRevealed(message) => {
                write!(f, "HIDDEN_CELL_REVEALED:{}", message)
            }
        }
    }
}

/// Everything that happened when one action was executed.
///
/// Steps are listed in the order they ran: the action itself, a
/// hidden-cell reveal (moves only), the win check, then the god power.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    pub action: Action,
    /// Where the worker stood before a move.
    pub origin: Option<Coordinate>,
    pub hidden_message: Option<String>,
    /// Set when the move won the game.
    pub winner: Option<PlayerId>,
    /// Extra action granted by the player's god card.
    pub power: Option<PowerSignal>,
}

impl ActionReport {
    /// Signals in reporting order: reveal first, then god power.
    #[must_use]
    pub fn signals(&self) -> Vec<ControlSignal> {
        self.hidden_message
            .iter()
            .map(|m| ControlSignal::HiddenCellRevealed(m.clone()))
            .chain(self.power.map(ControlSignal::from))
            .collect()
    }

    #[must_use]
    pub fn is_winning(&self) -> bool {
        self.winner.is_some()
    }
}

/// Result of starting a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnStart {
    /// The player may select a worker.
    Ready(PlayerId),
    /// No worker could move: the player lost.
    NoMoves { loser: PlayerId, winner: PlayerId },
    /// The game had already ended.
    GameOver,
}

/// Result of a successfully submitted intent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    WorkerSelected { worker: WorkerId, moves: Targets },
    Moved(ActionReport),
    Built(ActionReport),
    /// The turn ended; carries how the next one began.
    TurnPassed(TurnStart),
    DrawAgreed,
    DrawDeclined,
    Resigned { winner: PlayerId },
}
