//! Actions: one atomic, rule-checked change to the board.
//!
//! There are two kinds, `Move` and `Build`. Both follow the same
//! contract through `GameAction`:
//! - `is_valid` is a pure predicate and may be called any number of times
//! - `execute` re-checks `is_valid` and only then mutates; on `false`
//!   nothing changed
//!
//! Turn-level rules (whose turn it is, god-power restrictions, phases)
//! are not checked here; `GameManager` layers those on top.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::player::{PlayerId, WorkerId, WorkerRef};
use crate::game::Game;

/// Shared contract of move and build actions.
pub trait GameAction {
    /// Legal on the current board. Never mutates.
    fn is_valid(&self, game: &Game) -> bool;

    /// Apply if legal. Returns `false`, with no mutation, otherwise.
    fn execute(&self, game: &mut Game) -> bool;
}

/// Step a worker onto an adjacent cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveAction {
    pub player: PlayerId,
    pub worker: WorkerId,
    pub target: Coordinate,
}

impl MoveAction {
    #[must_use]
    pub fn new(player: PlayerId, worker: WorkerId, target: Coordinate) -> Self {
        Self { player, worker, target }
    }
}

impl GameAction for MoveAction {
    fn is_valid(&self, game: &Game) -> bool {
        let board = game.board();
        let Some(from) = game
            .worker(WorkerRef::new(self.player, self.worker))
            .and_then(|w| w.position())
            .and_then(|at| board.cell(at))
        else {
            return false;
        };
        let Some(to) = board.cell(self.target) else {
            return false;
        };

        from.is_adjacent_to(to) && from.can_move_to(to) && from.coordinate() != to.coordinate()
    }

    fn execute(&self, game: &mut Game) -> bool {
        if !self.is_valid(game) {
            return false;
        }
        game.relocate_worker(WorkerRef::new(self.player, self.worker), self.target)
    }
}

/// Raise the tower (or place the dome) on a cell next to the worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildAction {
    pub player: PlayerId,
    pub worker: WorkerId,
    pub target: Coordinate,
}

impl BuildAction {
    #[must_use]
    pub fn new(player: PlayerId, worker: WorkerId, target: Coordinate) -> Self {
        Self { player, worker, target }
    }
}

impl GameAction for BuildAction {
    fn is_valid(&self, game: &Game) -> bool {
        let board = game.board();
        let Some(from) = game
            .worker(WorkerRef::new(self.player, self.worker))
            .and_then(|w| w.position())
        else {
            return false;
        };

        board
            .cell(self.target)
            .is_some_and(|to| from.is_adjacent(to.coordinate()) && to.is_available_for_build())
    }

    fn execute(&self, game: &mut Game) -> bool {
        if !self.is_valid(game) {
            return false;
        }
        game.build_at(self.target)
    }
}

/// Action kind, for history and signal filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Build,
}

/// Either kind of action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(MoveAction),
    Build(BuildAction),
}

impl Action {
    /// Shorthand for `Action::Move(MoveAction::new(..))`.
    #[must_use]
    pub fn move_to(player: PlayerId, worker: WorkerId, target: Coordinate) -> Self {
        Action::Move(MoveAction::new(player, worker, target))
    }

    /// Shorthand for `Action::Build(BuildAction::new(..))`.
    #[must_use]
    pub fn build_on(player: PlayerId, worker: WorkerId, target: Coordinate) -> Self {
        Action::Build(BuildAction::new(player, worker, target))
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Move(_) => ActionKind::Move,
            Action::Build(_) => ActionKind::Build,
        }
    }

    /// The acting player.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Action::Move(m) => m.player,
            Action::Build(b) => b.player,
        }
    }

    #[must_use]
    pub fn worker(&self) -> WorkerRef {
        match self {
            Action::Move(m) => WorkerRef::new(m.player, m.worker),
            Action::Build(b) => WorkerRef::new(b.player, b.worker),
        }
    }

    /// The destination (move) or the built-on cell (build).
    #[must_use]
    pub fn target(&self) -> Coordinate {
        match self {
            Action::Move(m) => m.target,
            Action::Build(b) => b.target,
        }
    }
}

impl GameAction for Action {
    fn is_valid(&self, game: &Game) -> bool {
        match self {
            Action::Move(m) => m.is_valid(game),
            Action::Build(b) => b.is_valid(game),
        }
    }

    fn execute(&self, game: &mut Game) -> bool {
        match self {
            Action::Move(m) => m.execute(game),
            Action::Build(b) => b.execute(game),
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Action::Move(action)
    }
}

impl From<BuildAction> for Action {
    fn from(action: BuildAction) -> Self {
        Action::Build(action)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move(m) => write!(f, "{} worker {} moves to {}", m.player, m.worker.0, m.target),
            Action::Build(b) => write!(f, "{} worker {} builds on {}", b.player, b.worker.0, b.target),
        }
    }
}

/// An executed action with its place in the game, for history and replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player: action.player(),
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tower;
    use crate::core::{GameConfig, Player};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const W1: WorkerId = WorkerId::new(1);
    const W2: WorkerId = WorkerId::new(2);

    fn game() -> Game {
        let mut game = Game::new(
            vec![Player::new("Ada"), Player::new("Bo")],
            GameConfig::default().with_hidden_cells(0),
        )
        .unwrap();
        game.place_worker(WorkerRef::new(P0, W1), Coordinate::new(2, 2)).unwrap();
        game.place_worker(WorkerRef::new(P0, W2), Coordinate::new(0, 0)).unwrap();
        game.place_worker(WorkerRef::new(P1, W1), Coordinate::new(2, 3)).unwrap();
        game.place_worker(WorkerRef::new(P1, W2), Coordinate::new(4, 4)).unwrap();
        game
    }

    #[test]
    fn test_move_valid_and_execute() {
        let mut game = game();
        let action = MoveAction::new(P0, W1, Coordinate::new(1, 1));

        assert!(action.is_valid(&game));
        assert!(action.is_valid(&game));
        assert!(action.execute(&mut game));

        let worker = game.worker(WorkerRef::new(P0, W1)).unwrap();
        assert_eq!(worker.position(), Some(Coordinate::new(1, 1)));
        assert!(!game.board().cell(Coordinate::new(2, 2)).unwrap().is_occupied());
    }

    #[test]
    fn test_move_rejections_leave_board_untouched() {
        let mut game = game();
        game.board_mut()
            .place_tower(Coordinate::new(3, 2), Tower::with_level(2, false).unwrap())
            .unwrap();
        let before = format!("{}", game.board());

        for target in [
            Coordinate::new(2, 2),  // no-op
            Coordinate::new(2, 3),  // occupied
            Coordinate::new(3, 2),  // two levels up
            Coordinate::new(4, 2),  // not adjacent
            Coordinate::new(-1, 2), // off board
        ] {
            let action = MoveAction::new(P0, W1, target);
            assert!(!action.is_valid(&game), "{} should be illegal", target);
            assert!(!action.execute(&mut game));
        }

        assert_eq!(format!("{}", game.board()), before);
    }

    #[test]
    fn test_move_with_unknown_worker() {
        let game = game();
        let action = MoveAction::new(P0, WorkerId::new(9), Coordinate::new(1, 1));
        assert!(!action.is_valid(&game));
    }

    #[test]
    fn test_build_then_dome() {
        let mut game = game();
        let target = Coordinate::new(1, 2);
        game.board_mut()
            .place_tower(target, Tower::with_level(3, false).unwrap())
            .unwrap();

        let build = BuildAction::new(P0, W1, target);
        assert!(build.execute(&mut game));
        assert!(game.board().cell(target).unwrap().has_dome());

        assert!(!build.is_valid(&game));
        assert!(!build.execute(&mut game));
    }

    #[test]
    fn test_build_creates_tower_lazily() {
        let mut game = game();
        let target = Coordinate::new(3, 3);

        assert!(Action::build_on(P0, W1, target).execute(&mut game));
        assert_eq!(game.board().cell(target).unwrap().level(), 1);
    }

    #[test]
    fn test_build_rejections() {
        let game = game();
        assert!(!BuildAction::new(P0, W1, Coordinate::new(2, 3)).is_valid(&game));
        assert!(!BuildAction::new(P0, W1, Coordinate::new(2, 2)).is_valid(&game));
        assert!(!BuildAction::new(P0, W1, Coordinate::new(4, 2)).is_valid(&game));
    }

    #[test]
    fn test_action_accessors() {
        let action = Action::move_to(P1, W2, Coordinate::new(3, 3));

        assert_eq!(action.kind(), ActionKind::Move);
        assert_eq!(action.player(), P1);
        assert_eq!(action.worker(), WorkerRef::new(P1, W2));
        assert_eq!(action.target(), Coordinate::new(3, 3));
        assert_eq!(format!("{}", action), "Player 1 worker 2 moves to (3, 3)");
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Action::build_on(P0, W1, Coordinate::new(1, 2)), 3, 1);
        assert_eq!(record.player, P0);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
