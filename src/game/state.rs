//! Game state: the board, the players and the outcome.
//!
//! `Game` owns everything a rule check reads. The turn sequencer
//! (`GameManager`) wraps it and adds whose turn it is and what they may
//! do next.
//!
//! ## Setup
//!
//! ```
//! use santorini::core::{GameConfig, GameRng, Player};
//! use santorini::game::Game;
//! use santorini::gods;
//!
//! let mut rng = GameRng::new(42);
//! let mut game = Game::new(
//!     vec![Player::new("Ada"), Player::new("Bo")],
//!     GameConfig::default(),
//! )
//! .unwrap();
//! let cards = gods::deal(2, &mut rng);
//! game.initialize_game(cards, &mut rng).unwrap();
//!
//! assert_eq!(game.board().hidden_cells().count(), 2);
//! ```

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::board::{Board, RevealBudget};
use crate::core::{Action, Coordinate, GameConfig, GameRng, Player, PlayerId, PlayerMap, Worker, WorkerId, WorkerRef};
use crate::error::SetupError;
use crate::gods::{GodCard, PowerContext, PowerSignal};
use crate::rules::GameStatus;

/// Seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// Board, players and outcome of one game.
#[derive(Clone, Debug, Serialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    players: PlayerMap<Player>,
    status: GameStatus,
    winner: Option<PlayerId>,
    initialized: bool,
}

impl Game {
    /// Seat the players and give each their workers and clock.
    ///
    /// Workers get ids `1..=workers_per_player` and start off the board.
    /// Fails if there are not exactly two players, two share a name, or
    /// the configuration is unusable.
    pub fn new(players: Vec<Player>, config: GameConfig) -> Result<Self, SetupError> {
        config.validate()?;
        if players.len() != PLAYER_COUNT {
            return Err(SetupError::WrongPlayerCount {
                expected: PLAYER_COUNT,
                found: players.len(),
            });
        }

        let mut names = FxHashSet::default();
        for player in &players {
            if !names.insert(player.name()) {
                return Err(SetupError::DuplicatePlayerName(player.name().to_string()));
            }
        }

        let board = Board::new(config.rows, config.cols)?;
        let mut players = players;
        for (seat, player) in players.iter_mut().enumerate() {
            let owner = PlayerId::new(seat as u8);
            for id in 1..=config.workers_per_player {
                player.add_worker(Worker::new(WorkerId::new(id), owner));
            }
            player.set_remaining_secs(config.starting_time_secs);
        }

        Ok(Self {
            config,
            board,
            players: PlayerMap::from_vec(players),
            status: GameStatus::Ongoing,
            winner: None,
            initialized: false,
        })
    }

    /// Assign god cards, seat workers and hide cells.
    ///
    /// If any worker is still off the board, all workers are placed at
    /// random on empty ground-level cells; a host that positioned every
    /// worker beforehand keeps its layout. Hidden cells go on ground-level
    /// cells nobody stands on.
    ///
    /// All-or-nothing: on error the game is exactly as before.
    pub fn initialize_game(
        &mut self,
        god_cards: Vec<GodCard>,
        rng: &mut GameRng,
    ) -> Result<(), SetupError> {
        if self.initialized {
            return Err(SetupError::AlreadyInitialized);
        }
        if god_cards.len() != self.players.player_count() {
            return Err(SetupError::GodCardCountMismatch {
                players: self.players.player_count(),
                cards: god_cards.len(),
            });
        }

        let mut board = self.board.clone();
        let mut players = self.players.clone();

        for ((_, player), mut card) in players.iter_mut().zip(god_cards) {
            card.configure(&self.config);
            player.set_god_card(card);
        }

        let unplaced = players
            .values()
            .flat_map(Player::workers)
            .any(|w| w.position().is_none());
        if unplaced {
            board.place_workers_randomly(&mut players, rng)?;
        }
        board.create_hidden_cells(self.config.hidden_cells, rng)?;

        self.board = board;
        self.players = players;
        self.initialized = true;

        for (id, player) in self.players.iter() {
            log::info!("{} is {}", id, player);
        }
        Ok(())
    }

    /// Put a worker on a specific cell, before or instead of random
    /// placement. Domed cells are off limits.
    pub fn place_worker(&mut self, worker: WorkerRef, at: Coordinate) -> Result<(), SetupError> {
        let cell = self.board.cell(at).ok_or(SetupError::OffBoard(at))?;
        if cell.occupant().is_some_and(|other| other != worker) {
            return Err(SetupError::CellOccupied(at));
        }
        if cell.has_dome() {
            return Err(SetupError::DomedCell(at));
        }

        let Some(piece) = self
            .players
            .get_mut(worker.player)
            .and_then(|p| p.worker_mut(worker.worker))
        else {
            return Err(SetupError::UnknownWorker {
                player: worker.player,
                worker: worker.worker,
            });
        };

        self.board.relocate(piece, at);
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for building scenarios (`Board::place_tower`).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn worker(&self, who: WorkerRef) -> Option<&Worker> {
        self.players.get(who.player)?.worker(who.worker)
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    // === Mutation used by actions and the turn sequencer ===

    /// Move a worker through `Board::relocate`.
    pub(crate) fn relocate_worker(&mut self, who: WorkerRef, to: Coordinate) -> bool {
        let Some(worker) = self
            .players
            .get_mut(who.player)
            .and_then(|p| p.worker_mut(who.worker))
        else {
            return false;
        };
        self.board.relocate(worker, to)
    }

    pub(crate) fn build_at(&mut self, at: Coordinate) -> bool {
        self.board.build_at(at)
    }

    /// Whether the acting player's god card permits `action` right now.
    /// Players without a card are never restricted.
    #[must_use]
    pub fn power_allows(&self, action: &Action) -> bool {
        let Some(card) = self.player(action.player()).and_then(Player::god_card) else {
            return true;
        };
        match action {
            Action::Move(m) => card.allows_move(m.target),
            Action::Build(b) => card.allows_build(b.target),
        }
    }

    /// Run the acting player's god power on a completed action.
    pub(crate) fn apply_god_power(
        &mut self,
        action: &Action,
        origin: Option<Coordinate>,
    ) -> Option<PowerSignal> {
        let ctx = PowerContext {
            player: action.player(),
            board: &self.board,
            origin,
        };
        self.players
            .get_mut(action.player())?
            .god_card_mut()?
            .apply_power(&ctx, action)
    }

    pub(crate) fn reset_god_power(&mut self, player: PlayerId) {
        if let Some(card) = self.player_mut(player).and_then(Player::god_card_mut) {
            card.reset();
        }
    }

    /// Reveal the hidden cell at `at` for `player`, if any and if the
    /// budget allows, crediting the time bonus.
    pub(crate) fn reveal_hidden_at(
        &mut self,
        at: Coordinate,
        budget: &mut RevealBudget,
        player: PlayerId,
    ) -> Option<String> {
        let message = budget.try_reveal(self.board.cell_mut(at)?)?;
        let bonus = self.config.hidden_bonus_secs;
        if let Some(p) = self.players.get_mut(player) {
            p.add_time(bonus);
        }
        Some(message)
    }

    /// Enter a terminal status. A finished game stays finished.
    pub(crate) fn finish(&mut self, winner: Option<PlayerId>) -> bool {
        if self.is_over() {
            return false;
        }
        self.status = match winner {
            Some(_) => GameStatus::PlayerWon,
            None => GameStatus::Draw,
        };
        self.winner = winner;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tower;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const W1: WorkerId = WorkerId::new(1);
    const W2: WorkerId = WorkerId::new(2);

    fn players() -> Vec<Player> {
        vec![Player::new("Ada"), Player::new("Bo")]
    }

    #[test]
    fn test_new_creates_unplaced_workers() {
        let game = Game::new(players(), GameConfig::default()).unwrap();

        assert_eq!(game.player_count(), 2);
        for (id, player) in game.players().iter() {
            let ids: Vec<_> = player.workers().iter().map(|w| w.id().0).collect();
            assert_eq!(ids, vec![1, 2]);
            assert!(player.workers().iter().all(|w| w.owner() == id));
            assert!(player.workers().iter().all(|w| w.position().is_none()));
            assert_eq!(player.remaining_secs(), 900);
        }
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.is_initialized());
    }

    #[test]
    fn test_new_rejects_bad_tables() {
        let one = Game::new(vec![Player::new("Solo")], GameConfig::default());
        assert_eq!(
            one.unwrap_err(),
            SetupError::WrongPlayerCount { expected: 2, found: 1 }
        );

        let twins = Game::new(vec![Player::new("Ada"), Player::new("Ada")], GameConfig::default());
        assert_eq!(twins.unwrap_err(), SetupError::DuplicatePlayerName("Ada".into()));

        let empty = Game::new(players(), GameConfig::default().with_board_size(0));
        assert!(matches!(empty, Err(SetupError::InvalidBoardSize { .. })));
    }

    #[test]
    fn test_initialize_game() {
        let mut rng = GameRng::new(3);
        let mut game = Game::new(players(), GameConfig::default()).unwrap();

        game.initialize_game(vec![GodCard::artemis(), GodCard::triton()], &mut rng)
            .unwrap();

        assert!(game.is_initialized());
        assert_eq!(game.player(P0).unwrap().god_card().unwrap().name(), "Artemis");
        assert_eq!(game.player(P1).unwrap().god_card().unwrap().name(), "Triton");

        let occupied = game.board().cells().filter(|c| c.is_occupied()).count();
        assert_eq!(occupied, 4);
        let hidden: Vec<_> = game.board().hidden_cells().collect();
        assert_eq!(hidden.len(), 2);
        assert!(hidden.iter().all(|c| !c.is_occupied()));

        let again = game.initialize_game(vec![GodCard::artemis(), GodCard::triton()], &mut rng);
        assert_eq!(again.unwrap_err(), SetupError::AlreadyInitialized);
    }

    #[test]
    fn test_initialize_keeps_manual_layout() {
        let mut game = Game::new(players(), GameConfig::default().with_hidden_cells(0)).unwrap();
        let spots = [
            (P0, W1, Coordinate::new(0, 0)),
            (P0, W2, Coordinate::new(0, 1)),
            (P1, W1, Coordinate::new(4, 4)),
            (P1, W2, Coordinate::new(4, 3)),
        ];
        for (p, w, at) in spots {
            game.place_worker(WorkerRef::new(p, w), at).unwrap();
        }

        game.initialize_game(vec![GodCard::demeter(), GodCard::artemis()], &mut GameRng::new(1))
            .unwrap();

        for (p, w, at) in spots {
            let worker = game.worker(WorkerRef::new(p, w)).unwrap();
            assert_eq!(worker.position(), Some(at));
        }
    }

    #[test]
    fn test_initialize_rejects_card_count() {
        let mut game = Game::new(players(), GameConfig::default()).unwrap();
        let result = game.initialize_game(vec![GodCard::artemis()], &mut GameRng::new(1));

        assert_eq!(
            result.unwrap_err(),
            SetupError::GodCardCountMismatch { players: 2, cards: 1 }
        );
        assert!(!game.is_initialized());
    }

    #[test]
    fn test_initialize_is_all_or_nothing() {
        // 2x2 board: room for the four workers, none left for hidden cells.
        let config = GameConfig::default().with_board_size(2).with_hidden_cells(1);
        let mut game = Game::new(players(), config).unwrap();

        let result = game.initialize_game(vec![GodCard::artemis(), GodCard::demeter()], &mut GameRng::new(5));

        assert!(matches!(result, Err(SetupError::NotEnoughSpace { .. })));
        assert!(!game.is_initialized());
        assert!(game.board().cells().all(|c| !c.is_occupied()));
        assert!(game.player(P0).unwrap().god_card().is_none());
    }

    #[test]
    fn test_initialize_configures_triton_limit() {
        let config = GameConfig::default().with_triton_chain_limit(3);
        let mut game = Game::new(players(), config).unwrap();

        game.initialize_game(vec![GodCard::triton(), GodCard::demeter()], &mut GameRng::new(2))
            .unwrap();

        assert_eq!(game.player(P0).unwrap().god_card(), Some(&GodCard::triton_with_limit(3)));
    }

    #[test]
    fn test_place_worker_errors() {
        let mut game = Game::new(players(), GameConfig::default()).unwrap();
        game.place_worker(WorkerRef::new(P0, W1), Coordinate::new(1, 1)).unwrap();

        assert_eq!(
            game.place_worker(WorkerRef::new(P1, W1), Coordinate::new(1, 1)),
            Err(SetupError::CellOccupied(Coordinate::new(1, 1)))
        );
        assert_eq!(
            game.place_worker(WorkerRef::new(P1, W1), Coordinate::new(5, 0)),
            Err(SetupError::OffBoard(Coordinate::new(5, 0)))
        );
        assert_eq!(
            game.place_worker(WorkerRef::new(P1, WorkerId::new(3)), Coordinate::new(2, 2)),
            Err(SetupError::UnknownWorker {
                player: P1,
                worker: WorkerId::new(3)
            })
        );

        game.board_mut()
            .place_tower(Coordinate::new(2, 2), Tower::with_level(3, true).unwrap())
            .unwrap();
        assert_eq!(
            game.place_worker(WorkerRef::new(P1, W1), Coordinate::new(2, 2)),
            Err(SetupError::DomedCell(Coordinate::new(2, 2)))
        );
        assert!(!game.board().cell(Coordinate::new(2, 2)).unwrap().is_occupied());

        // Re-placing a worker moves it.
        game.place_worker(WorkerRef::new(P0, W1), Coordinate::new(3, 3)).unwrap();
        assert!(!game.board().cell(Coordinate::new(1, 1)).unwrap().is_occupied());
        assert_eq!(
            game.board().cell(Coordinate::new(3, 3)).unwrap().occupant(),
            Some(WorkerRef::new(P0, W1))
        );
    }

    #[test]
    fn test_reveal_credits_bonus_once() {
        let config = GameConfig::default().with_hidden_cells(0);
        let mut game = Game::new(players(), config).unwrap();
        let at = Coordinate::new(2, 2);
        game.board_mut().cell_mut(at).unwrap().hide("boo");
        let mut budget = RevealBudget::new(2);

        assert_eq!(game.reveal_hidden_at(at, &mut budget, P0).as_deref(), Some("boo"));
        assert_eq!(game.reveal_hidden_at(at, &mut budget, P0), None);
        assert_eq!(game.player(P0).unwrap().remaining_secs(), 910);
        assert_eq!(budget.revealed(), 1);
    }

    #[test]
    fn test_finish_is_sticky() {
        let mut game = Game::new(players(), GameConfig::default()).unwrap();

        assert!(game.finish(Some(P1)));
        assert!(!game.finish(None));
        assert_eq!(game.status(), GameStatus::PlayerWon);
        assert_eq!(game.winner(), Some(P1));
    }

    #[test]
    fn test_power_allows_without_card() {
        let game = Game::new(players(), GameConfig::default()).unwrap();
        assert!(game.power_allows(&Action::move_to(P0, W1, Coordinate::new(0, 0))));
        assert!(game.power_allows(&Action::build_on(P1, W2, Coordinate::new(0, 0))));
    }
}
