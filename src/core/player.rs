//! Players, workers and per-player storage.
//!
//! ## PlayerId / PlayerMap
//!
//! `PlayerId` is a 0-based seat index. `PlayerMap<T>` stores one `T` per
//! seat and is looked up by `PlayerId`.
//!
//! ## Workers
//!
//! A worker never holds a reference to its cell. It records a
//! `Coordinate`, and the cell records a `WorkerRef` back. Only
//! `Board::relocate` writes either side, so the two always agree.

use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use crate::gods::GodCard;

/// Player seat identifier. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one, round-robin.
    #[must_use]
    pub fn next(self, player_count: usize) -> PlayerId {
        PlayerId(((self.index() + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Worker identifier, unique within its owning player (1-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkerId(pub u8);

impl WorkerId {
    /// Create a new worker ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }
}

/// Game-wide worker handle: owner plus per-owner id.
///
/// This is what a cell stores for its occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerRef {
    /// Owning player.
    pub player: PlayerId,
    /// Worker id within that player.
    pub worker: WorkerId,
}

impl WorkerRef {
    /// Create a worker handle.
    #[must_use]
    pub const fn new(player: PlayerId, worker: WorkerId) -> Self {
        Self { player, worker }
    }
}

impl std::fmt::Display for WorkerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} worker {}", self.player, self.worker.0)
    }
}

/// A player's piece. Created once at setup and repositioned in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    id: WorkerId,
    owner: PlayerId,
    position: Option<Coordinate>,
}

impl Worker {
    /// Create an unplaced worker.
    #[must_use]
    pub fn new(id: WorkerId, owner: PlayerId) -> Self {
        Self {
            id,
            owner,
            position: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> WorkerId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Current cell, or `None` before placement.
    #[must_use]
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    /// Game-wide handle for this worker.
    #[must_use]
    pub fn reference(&self) -> WorkerRef {
        WorkerRef::new(self.owner, self.id)
    }

    pub(crate) fn set_position(&mut self, position: Option<Coordinate>) {
        self.position = position;
    }
}

/// A participant: name, workers, optional god card and clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    name: String,
    workers: Vec<Worker>,
    god_card: Option<GodCard>,
    remaining_secs: u32,
}

impl Player {
    /// Create a player with no workers, no god card and an empty clock.
    ///
    /// `Game::new` gives the player their workers and starting time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            workers: Vec::new(),
            god_card: None,
            remaining_secs: 0,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Look up a worker by id.
    #[must_use]
    pub fn worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub(crate) fn worker_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| w.id == id)
    }

    pub(crate) fn workers_mut(&mut self) -> &mut [Worker] {
        &mut self.workers
    }

    pub(crate) fn add_worker(&mut self, worker: Worker) {
        self.workers.push(worker);
    }

    #[must_use]
    pub fn god_card(&self) -> Option<&GodCard> {
        self.god_card.as_ref()
    }

    pub(crate) fn god_card_mut(&mut self) -> Option<&mut GodCard> {
        self.god_card.as_mut()
    }

    pub(crate) fn set_god_card(&mut self, card: GodCard) {
        self.god_card = Some(card);
    }

    /// Seconds left on this player's clock.
    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub(crate) fn set_remaining_secs(&mut self, secs: u32) {
        self.remaining_secs = secs;
    }

    pub(crate) fn add_time(&mut self, secs: u32) {
        self.remaining_secs = self.remaining_secs.saturating_add(secs);
    }

    /// Subtract elapsed time, returning what is left.
    pub(crate) fn consume_time(&mut self, secs: u32) -> u32 {
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        self.remaining_secs
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.god_card {
            Some(card) => write!(f, "{} ({}, {} workers)", self.name, card.name(), self.workers.len()),
            None => write!(f, "{} ({} workers)", self.name, self.workers.len()),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ```
/// use santorini::core::{PlayerId, PlayerMap};
///
/// let mut clocks: PlayerMap<u32> = PlayerMap::new(2, |_| 900);
/// if let Some(secs) = clocks.get_mut(PlayerId::new(1)) {
///     *secs -= 30;
/// }
/// assert_eq!(clocks.get(PlayerId::new(0)), Some(&900));
/// assert_eq!(clocks.get(PlayerId::new(1)), Some(&870));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Seat entries in order: element `i` belongs to `PlayerId(i)`.
    pub(crate) fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}
