//! Turn sequencer.
//!
//! `GameManager` owns a `Game` and drives it turn by turn:
//!
//! 1. `start_turn` checks the current player can move at all; if not,
//!    they lose.
//! 2. The player selects a worker, moves it, then builds with it. God
//!    powers may grant an optional extra move or build.
//! 3. `end_turn` clears the player's god-power state and passes the turn.
//!
//! Hosts either call `execute_turn` with fully-formed actions or feed
//! `Intent`s through `submit`, which also enforces the phase order.
//!
//! Every executed action runs the same pipeline: validate, execute,
//! reveal a hidden cell (moves only), check for a win, apply the god
//! power, in that order.

use im::Vector;
use serde::Serialize;

use super::state::Game;
use super::turn::{ActionReport, Intent, TurnOutcome, TurnPhase, TurnStart};
use crate::board::{RevealBudget, Targets};
use crate::core::{Action, ActionRecord, Coordinate, GameAction, PlayerId, WorkerId, WorkerRef};
use crate::error::{IntentError, SetupError};
use crate::rules::{check_lose_condition, check_win_condition, GameResult, GameStatus};

/// Drives a game through its turns.
#[derive(Clone, Debug, Serialize)]
pub struct GameManager {
    game: Game,
    current: PlayerId,
    phase: TurnPhase,
    selected: Option<WorkerId>,
    /// An optional extra move is on offer (Artemis, Triton).
    extra_move_offered: bool,
    /// An optional second build is on offer (Demeter).
    extra_build_offered: bool,
    reveals: RevealBudget,
    turn_number: u32,
    sequence: u32,
    history: Vector<ActionRecord>,
}

impl GameManager {
    /// Take over a game that went through `initialize_game`. Player 0
    /// moves first.
    pub fn new(game: Game) -> Result<Self, SetupError> {
        if !game.is_initialized() {
            return Err(SetupError::NotInitialized);
        }
        let reveals = RevealBudget::new(game.config().max_hidden_reveals);
        Ok(Self {
            game,
            current: PlayerId::new(0),
            phase: TurnPhase::WorkerSelection,
            selected: None,
            extra_move_offered: false,
            extra_build_offered: false,
            reveals,
            turn_number: 1,
            sequence: 0,
            history: Vector::new(),
        })
    }

    /// Begin play with the first turn.
    pub fn start(&mut self) -> TurnStart {
        log::info!(
            "game started: {}",
            self.game
                .players()
                .values()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" vs ")
        );
        self.start_turn()
    }

    // === Accessors ===

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable game access for laying out scenarios between actions.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn selected_worker(&self) -> Option<WorkerRef> {
        self.selected.map(|id| WorkerRef::new(self.current, id))
    }

    /// Turn counter, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn reveals(&self) -> &RevealBudget {
        &self.reveals
    }

    /// Every executed action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.game.winner()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game.is_over()
    }

    /// Final result, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.game.status() {
            GameStatus::Ongoing => None,
            GameStatus::PlayerWon => self.game.winner().map(GameResult::Winner),
            GameStatus::Draw => Some(GameResult::Draw),
        }
    }

    // === Turn lifecycle ===

    /// Start the current player's turn, ending the game if they cannot
    /// move any worker.
    pub fn start_turn(&mut self) -> TurnStart {
        if self.game.is_over() {
            return TurnStart::GameOver;
        }

        self.phase = TurnPhase::WorkerSelection;
        self.selected = None;
        self.extra_move_offered = false;
        self.extra_build_offered = false;
        self.sequence = 0;

        if check_lose_condition(&self.game, self.current) {
            let loser = self.current;
            let winner = loser.next(self.game.player_count());
            log::info!("{} has no legal move", loser);
            self.end_game(Some(winner));
            return TurnStart::NoMoves { loser, winner };
        }

        log::info!("turn {}: {} to play", self.turn_number, self.current);
        TurnStart::Ready(self.current)
    }

    /// Whether `action` may be executed now: it belongs to the current
    /// player, is legal on the board and no god power rules it out.
    #[must_use]
    pub fn validate_turn(&self, action: &Action) -> bool {
        self.check_action(action).is_ok()
    }

    fn check_action(&self, action: &Action) -> Result<(), IntentError> {
        if self.game.is_over() {
            return Err(IntentError::GameOver);
        }
        if action.player() != self.current {
            return Err(IntentError::NotYourTurn(action.player()));
        }
        if self.game.worker(action.worker()).is_none() {
            return Err(IntentError::UnknownWorker);
        }
        if !action.is_valid(&self.game) {
            return Err(match action {
                Action::Move(m) => IntentError::IllegalMove(m.target),
                Action::Build(b) => IntentError::IllegalBuild(b.target),
            });
        }
        if !self.game.power_allows(action) {
            return Err(IntentError::RestrictedByPower(action.target()));
        }
        Ok(())
    }

    /// Validate and execute one action, then run reveal, win check and
    /// god power.
    ///
    /// On error nothing changed. Does not track phases; use `submit` for
    /// phase-checked play.
    pub fn execute_turn(&mut self, action: &Action) -> Result<ActionReport, IntentError> {
        self.check_action(action)?;

        let origin = match action {
            Action::Move(_) => self.game.worker(action.worker()).and_then(|w| w.position()),
            Action::Build(_) => None,
        };
        if !action.execute(&mut self.game) {
            return Err(match action {
                Action::Move(m) => IntentError::IllegalMove(m.target),
                Action::Build(b) => IntentError::IllegalBuild(b.target),
            });
        }
        self.sequence += 1;
        self.history
            .push_back(ActionRecord::new(*action, self.turn_number, self.sequence));
        log::debug!("{}", action);

        let hidden_message = match action {
            Action::Move(m) => self
                .game
                .reveal_hidden_at(m.target, &mut self.reveals, self.current),
            Action::Build(_) => None,
        };
        if let Some(message) = &hidden_message {
            log::debug!("{} revealed a hidden cell: {}", self.current, message);
        }

        let winner = if check_win_condition(&self.game, action) {
            self.end_game(Some(self.current));
            Some(self.current)
        } else {
            None
        };

        // A won game grants nothing further.
        let power = if winner.is_none() {
            self.game.apply_god_power(action, origin)
        } else {
            None
        };
        if let Some(signal) = power {
            log::debug!("{} power: {}", self.current, signal);
        }

        Ok(ActionReport {
            action: *action,
            origin,
            hidden_message,
            winner,
            power,
        })
    }

    /// Finish the current turn: clear god-power state, pass to the next
    /// player. Call `start_turn` afterwards.
    pub fn end_turn(&mut self) -> Result<(), IntentError> {
        if self.game.is_over() {
            return Err(IntentError::GameOver);
        }
        self.game.reset_god_power(self.current);
        self.current = self.current.next(self.game.player_count());
        self.turn_number += 1;
        self.phase = TurnPhase::WorkerSelection;
        self.selected = None;
        self.extra_move_offered = false;
        self.extra_build_offered = false;
        Ok(())
    }

    /// End the game. `None` is a draw. Has no effect once the game is
    /// over.
    pub fn end_game(&mut self, winner: Option<PlayerId>) {
        if !self.game.finish(winner) {
            return;
        }
        self.phase = TurnPhase::TurnEnd;
        match winner {
            Some(player) => log::info!("game over after turn {}: {} wins", self.turn_number, player),
            None => log::info!("game over after turn {}: draw", self.turn_number),
        }
    }

    /// Charge `secs` to the current player's clock. When it runs out the
    /// opponent wins. Returns the seconds left.
    pub fn consume_time(&mut self, secs: u32) -> Result<u32, IntentError> {
        if self.game.is_over() {
            return Err(IntentError::GameOver);
        }
        let current = self.current;
        let left = self
            .game
            .player_mut(current)
            .map_or(0, |p| p.consume_time(secs));
        if left == 0 {
            log::info!("{} ran out of time", current);
            self.end_game(Some(current.next(self.game.player_count())));
        }
        Ok(left)
    }

    /// Answer a draw offer.
    pub fn propose_draw(&mut self, accepted: bool) -> Result<TurnOutcome, IntentError> {
        if self.game.is_over() {
            return Err(IntentError::GameOver);
        }
        if accepted {
            self.end_game(None);
            Ok(TurnOutcome::DrawAgreed)
        } else {
            Ok(TurnOutcome::DrawDeclined)
        }
    }

    /// The current player concedes.
    pub fn resign(&mut self) -> Result<TurnOutcome, IntentError> {
        if self.game.is_over() {
            return Err(IntentError::GameOver);
        }
        let winner = self.current.next(self.game.player_count());
        log::info!("{} resigned", self.current);
        self.end_game(Some(winner));
        Ok(TurnOutcome::Resigned { winner })
    }

    // === Legal targets ===

    /// Cells `worker` may move to now, god-power restrictions included.
    #[must_use]
    pub fn available_move_cells(&self, worker: WorkerRef) -> Targets {
        let Some(piece) = self.game.worker(worker) else {
            return Targets::new();
        };
        self.game
            .board()
            .available_move_cells(piece)
            .into_iter()
            .filter(|&at| self.game.power_allows(&Action::move_to(worker.player, worker.worker, at)))
            .collect()
    }

    /// Cells `worker` may build on now, god-power restrictions included.
    #[must_use]
    pub fn available_build_cells(&self, worker: WorkerRef) -> Targets {
        let Some(piece) = self.game.worker(worker) else {
            return Targets::new();
        };
        self.game
            .board()
            .available_build_cells(piece)
            .into_iter()
            .filter(|&at| self.game.power_allows(&Action::build_on(worker.player, worker.worker, at)))
            .collect()
    }

    // === Intent driver ===

    /// Apply one player intent, enforcing the turn's phase order.
    pub fn submit(&mut self, intent: Intent) -> Result<TurnOutcome, IntentError> {
        let result = self.dispatch(intent);
        if let Err(err) = &result {
            log::trace!("rejected {:?} from {}: {}", intent, self.current, err);
        }
        result
    }

    fn dispatch(&mut self, intent: Intent) -> Result<TurnOutcome, IntentError> {
        if self.game.is_over() {
            return Err(IntentError::GameOver);
        }
        match intent {
            Intent::SelectWorker(worker) => self.select_worker(worker),
            Intent::Move(target) => self.submit_move(target),
            Intent::Build(target) => self.submit_build(target),
            Intent::EndTurn => self.submit_end_turn(),
            Intent::ProposeDraw { accepted } => self.propose_draw(accepted),
            Intent::Resign => self.resign(),
        }
    }

    fn select_worker(&mut self, worker: WorkerRef) -> Result<TurnOutcome, IntentError> {
        if self.phase != TurnPhase::WorkerSelection {
            return Err(IntentError::OutOfPhase(self.phase));
        }
        if worker.player != self.current {
            return Err(IntentError::NotYourWorker);
        }
        if self.game.worker(worker).is_none() {
            return Err(IntentError::UnknownWorker);
        }
        let moves = self.available_move_cells(worker);
        if moves.is_empty() {
            return Err(IntentError::WorkerHasNoMoves);
        }

        self.selected = Some(worker.worker);
        self.phase = TurnPhase::MoveSelection;
        Ok(TurnOutcome::WorkerSelected {
            worker: worker.worker,
            moves,
        })
    }

    fn submit_move(&mut self, target: Coordinate) -> Result<TurnOutcome, IntentError> {
        if self.phase != TurnPhase::MoveSelection {
            return Err(IntentError::OutOfPhase(self.phase));
        }
        let worker = self.selected.ok_or(IntentError::NoWorkerSelected)?;

        let report = self.execute_turn(&Action::move_to(self.current, worker, target))?;
        if self.game.is_over() {
            return Ok(TurnOutcome::Moved(report));
        }

        self.extra_move_offered = report.power.is_some_and(|p| p.grants_move());
        self.phase = if self.extra_move_offered {
            TurnPhase::MoveSelection
        } else {
            TurnPhase::BuildSelection
        };
        Ok(TurnOutcome::Moved(report))
    }

    fn submit_build(&mut self, target: Coordinate) -> Result<TurnOutcome, IntentError> {
        if !self.build_allowed() {
            return Err(IntentError::OutOfPhase(self.phase));
        }
        let worker = self.selected.ok_or(IntentError::NoWorkerSelected)?;

        let report = self.execute_turn(&Action::build_on(self.current, worker, target))?;
        self.extra_move_offered = false;
        self.extra_build_offered = report.power.is_some_and(|p| !p.grants_move());
        self.phase = if self.extra_build_offered {
            TurnPhase::BuildSelection
        } else {
            TurnPhase::TurnEnd
        };
        Ok(TurnOutcome::Built(report))
    }

    fn submit_end_turn(&mut self) -> Result<TurnOutcome, IntentError> {
        if !self.end_turn_allowed() {
            return Err(IntentError::OutOfPhase(self.phase));
        }
        self.end_turn()?;
        Ok(TurnOutcome::TurnPassed(self.start_turn()))
    }

    /// Building is the next step, or declines an optional extra move.
    fn build_allowed(&self) -> bool {
        match self.phase {
            TurnPhase::BuildSelection => true,
            TurnPhase::MoveSelection => self.extra_move_offered,
            TurnPhase::WorkerSelection | TurnPhase::TurnEnd => false,
        }
    }

    /// The turn may end: it is complete, only an optional build is left,
    /// or the selected worker is walled in with nothing to build.
    fn end_turn_allowed(&self) -> bool {
        match self.phase {
            TurnPhase::TurnEnd => true,
            TurnPhase::BuildSelection if self.extra_build_offered => true,
            TurnPhase::BuildSelection | TurnPhase::MoveSelection if self.build_allowed() => self
                .selected_worker()
                .map_or(true, |w| self.available_build_cells(w).is_empty()),
            _ => false,
        }
    }

    /// Placement intents acceptable right now.
    ///
    /// Draw offers and resignation are always possible and not listed.
    #[must_use]
    pub fn legal_intents(&self) -> Vec<Intent> {
        if self.game.is_over() {
            return Vec::new();
        }

        let mut intents = Vec::new();
        match self.phase {
            TurnPhase::WorkerSelection => {
                if let Some(player) = self.game.player(self.current) {
                    intents.extend(
                        player
                            .workers()
                            .iter()
                            .map(|w| w.reference())
                            .filter(|&w| !self.available_move_cells(w).is_empty())
                            .map(Intent::SelectWorker),
                    );
                }
            }
            TurnPhase::MoveSelection | TurnPhase::BuildSelection => {
                if let Some(worker) = self.selected_worker() {
                    if self.phase == TurnPhase::MoveSelection {
                        intents.extend(self.available_move_cells(worker).into_iter().map(Intent::Move));
                    }
                    if self.build_allowed() {
                        intents.extend(self.available_build_cells(worker).into_iter().map(Intent::Build));
                    }
                }
            }
            TurnPhase::TurnEnd => {}
        }
        if self.end_turn_allowed() {
            intents.push(Intent::EndTurn);
        }
        intents
    }
}
