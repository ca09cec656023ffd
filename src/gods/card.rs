//! God cards: per-player rule modifiers.
//!
//! Each card is consulted in two places:
//! - `allows_move` / `allows_build` before an action is accepted
//! - `apply_power` after an action succeeded, possibly granting another
//!
//! The turn sequencer calls these uniformly for every card. Adding a
//! power means adding a variant and filling in the match arms here.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{Action, Coordinate, GameConfig, PlayerId};

/// What a god power grants after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerSignal {
    /// Artemis: one more move, not back to where the first started.
    SecondMove,
    /// Demeter: one more build, not on the same cell.
    SecondBuild,
    /// Triton: landed on the perimeter, may move again.
    TritonExtraMove,
}

impl PowerSignal {
    /// Wire name of the signal.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PowerSignal::SecondMove => "SECOND_MOVE",
            PowerSignal::SecondBuild => "SECOND_BUILD",
            PowerSignal::TritonExtraMove => "TRITON_EXTRA_MOVE",
        }
    }

    /// Whether the granted action is another move (otherwise a build).
    #[must_use]
    pub fn grants_move(self) -> bool {
        matches!(self, PowerSignal::SecondMove | PowerSignal::TritonExtraMove)
    }
}

impl std::fmt::Display for PowerSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view handed to `apply_power`.
#[derive(Clone, Copy, Debug)]
pub struct PowerContext<'a> {
    /// The acting player (the card's owner).
    pub player: PlayerId,
    /// Board after the action was applied.
    pub board: &'a Board,
    /// For moves, the cell the worker left.
    pub origin: Option<Coordinate>,
}

/// A god power with its per-turn state.
///
/// State resets at the end of each of the owner's turns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GodCard {
    Artemis {
        second_move_used: bool,
        moved_from: Option<Coordinate>,
    },
    Demeter {
        second_build_used: bool,
        first_build: Option<Coordinate>,
    },
    Triton {
        extra_moves: u32,
        limit: Option<u32>,
    },
}

impl GodCard {
    #[must_use]
    pub fn artemis() -> Self {
        GodCard::Artemis {
            second_move_used: false,
            moved_from: None,
        }
    }

    #[must_use]
    pub fn demeter() -> Self {
        GodCard::Demeter {
            second_build_used: false,
            first_build: None,
        }
    }

    /// Triton with no cap on chained perimeter moves.
    #[must_use]
    pub fn triton() -> Self {
        GodCard::Triton {
            extra_moves: 0,
            limit: None,
        }
    }

    /// Triton granting at most `limit` extra moves per turn.
    #[must_use]
    pub fn triton_with_limit(limit: u32) -> Self {
        GodCard::Triton {
            extra_moves: 0,
            limit: Some(limit),
        }
    }

    /// Every card in the game, fresh.
    #[must_use]
    pub fn roster() -> Vec<GodCard> {
        vec![GodCard::artemis(), GodCard::demeter(), GodCard::triton()]
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GodCard::Artemis { .. } => "Artemis",
            GodCard::Demeter { .. } => "Demeter",
            GodCard::Triton { .. } => "Triton",
        }
    }

    /// Rules text.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            GodCard::Artemis { .. } => {
                "Your worker may move one additional time, but not back to its initial space."
            }
            GodCard::Demeter { .. } => {
                "Your worker may build one additional time, but not on the same space."
            }
            GodCard::Triton { .. } => {
                "Each time your worker moves into a perimeter space, it may immediately move again."
            }
        }
    }

    /// Pick up game-wide settings that affect this card.
    pub fn configure(&mut self, config: &GameConfig) {
        if let GodCard::Triton { limit, .. } = self {
            if config.triton_chain_limit.is_some() {
                *limit = config.triton_chain_limit;
            }
        }
    }

    /// Whether this card lets its owner move to `target` right now.
    #[must_use]
    pub fn allows_move(&self, target: Coordinate) -> bool {
        match self {
            GodCard::Artemis { moved_from, .. } => *moved_from != Some(target),
            GodCard::Demeter { .. } | GodCard::Triton { .. } => true,
        }
    }

    /// Whether this card lets its owner build on `target` right now.
    #[must_use]
    pub fn allows_build(&self, target: Coordinate) -> bool {
        match self {
            GodCard::Demeter { first_build, .. } => *first_build != Some(target),
            GodCard::Artemis { .. } | GodCard::Triton { .. } => true,
        }
    }

    /// React to a successful action; `Some` grants one more.
    pub fn apply_power(&mut self, ctx: &PowerContext<'_>, action: &Action) -> Option<PowerSignal> {
        match (self, action) {
            (
                GodCard::Artemis {
                    second_move_used,
                    moved_from,
                },
                Action::Move(_),
            ) if !*second_move_used => {
                *second_move_used = true;
                *moved_from = ctx.origin;
                Some(PowerSignal::SecondMove)
            }
            (
                GodCard::Demeter {
                    second_build_used,
                    first_build,
                },
                Action::Build(build),
            ) if !*second_build_used => {
                *second_build_used = true;
                *first_build = Some(build.target);
                Some(PowerSignal::SecondBuild)
            }
            (GodCard::Triton { extra_moves, limit }, Action::Move(mv)) => {
                let under_limit = limit.map_or(true, |cap| *extra_moves < cap);
                if under_limit && ctx.board.is_perimeter(mv.target) {
                    *extra_moves += 1;
                    Some(PowerSignal::TritonExtraMove)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Clear per-turn state. Configuration such as Triton's limit stays.
    pub fn reset(&mut self) {
        match self {
            GodCard::Artemis {
                second_move_used,
                moved_from,
            } => {
                *second_move_used = false;
                *moved_from = None;
            }
            GodCard::Demeter {
                second_build_used,
                first_build,
            } => {
                *second_build_used = false;
                *first_build = None;
            }
            GodCard::Triton { extra_moves, .. } => *extra_moves = 0,
        }
    }
}

impl std::fmt::Display for GodCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
