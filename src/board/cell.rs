//! A single board location.

use serde::Serialize;

use super::tower::Tower;
use crate::core::{Coordinate, WorkerRef};

/// One square of the board.
///
/// Owns its tower (created on first build) and records, but does not
/// own, the worker standing on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    coordinate: Coordinate,
    occupant: Option<WorkerRef>,
    tower: Option<Tower>,
    hidden: bool,
    hidden_message: String,
    revealed: bool,
}

impl Cell {
    pub(crate) fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            occupant: None,
            tower: None,
            hidden: false,
            hidden_message: String::new(),
            revealed: false,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// The worker standing here, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<WorkerRef> {
        self.occupant
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    #[must_use]
    pub fn tower(&self) -> Option<&Tower> {
        self.tower.as_ref()
    }

    /// Tower level, 0 when nothing has been built.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.tower.map_or(0, |t| t.level())
    }

    #[must_use]
    pub fn has_dome(&self) -> bool {
        self.tower.is_some_and(|t| t.has_dome())
    }

    /// No tower, or a tower still at level 0.
    #[must_use]
    pub fn is_ground_level(&self) -> bool {
        self.level() == 0
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn has_been_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn is_adjacent_to(&self, other: &Cell) -> bool {
        self.coordinate.is_adjacent(other.coordinate)
    }

    /// Whether a worker standing here may step onto `target`.
    ///
    /// The target must be free and domeless, and at most one level
    /// higher. Dropping any number of levels is fine.
    #[must_use]
    pub fn can_move_to(&self, target: &Cell) -> bool {
        if target.is_occupied() || target.has_dome() {
            return false;
        }
        i16::from(target.level()) - i16::from(self.level()) <= 1
    }

    /// Free and domeless. A level-3 cell is buildable: it gets the dome.
    #[must_use]
    pub fn is_available_for_build(&self) -> bool {
        !self.is_occupied() && !self.has_dome()
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<WorkerRef>) {
        self.occupant = occupant;
    }

    /// One build step, creating the tower lazily.
    pub(crate) fn build(&mut self) -> bool {
        self.tower.get_or_insert_with(Tower::new).build()
    }

    pub(crate) fn set_tower(&mut self, tower: Tower) {
        self.tower = Some(tower);
    }

    pub(crate) fn hide(&mut self, message: &str) {
        self.hidden = true;
        self.hidden_message = message.to_string();
    }

    /// The hidden message, the first time only.
    pub(crate) fn reveal_hidden(&mut self) -> Option<String> {
        if !self.hidden || self.revealed {
            return None;
        }
        self.revealed = true;
        Some(self.hidden_message.clone())
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coordinate)?;
        if let Some(tower) = &self.tower {
            write!(f, " {}", tower)?;
        }
        if let Some(occupant) = &self.occupant {
            write!(f, " [{}]", occupant)?;
        }
        Ok(())
    }
}
