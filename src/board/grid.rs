//! The board: a fixed grid of cells addressed by coordinate.

use serde::Serialize;
use smallvec::SmallVec;

use super::cell::Cell;
use super::tower::Tower;
use crate::core::{Coordinate, GameRng, Player, PlayerMap, Worker};
use crate::error::SetupError;

/// Up to 8 neighboring coordinates; never spills to the heap.
pub type Targets = SmallVec<[Coordinate; 8]>;

/// Fixed-size grid. One `Cell` per coordinate, created once.
#[derive(Clone, Debug, Serialize)]
pub struct Board {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    hidden_cells_created: bool,
}

impl Board {
    /// Create an empty `rows x cols` board.
    pub fn new(rows: i32, cols: i32) -> Result<Self, SetupError> {
        if rows <= 0 || cols <= 0 {
            return Err(SetupError::InvalidBoardSize { rows, cols });
        }

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(Coordinate::new(row, col))))
            .collect();

        Ok(Self {
            rows,
            cols,
            cells,
            hidden_cells_created: false,
        })
    }

    #[must_use]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Bounds check: `0 <= row < rows` and `0 <= col < cols`.
    #[must_use]
    pub fn contains(&self, at: Coordinate) -> bool {
        (0..self.rows).contains(&at.row) && (0..self.cols).contains(&at.col)
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        if !self.contains(at) {
            return None;
        }
        usize::try_from(at.row * self.cols + at.col).ok()
    }

    #[must_use]
    pub fn cell(&self, at: Coordinate) -> Option<&Cell> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, at: Coordinate) -> Option<&mut Cell> {
        let i = self.index(at)?;
        Some(&mut self.cells[i])
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// On the outermost row or column.
    #[must_use]
    pub fn is_perimeter(&self, at: Coordinate) -> bool {
        self.contains(at)
            && (at.row == 0 || at.col == 0 || at.row == self.rows - 1 || at.col == self.cols - 1)
    }

    /// The up-to-8 in-bounds neighbors of `at`.
    pub fn adjacent_cells(&self, at: Coordinate) -> impl Iterator<Item = &Cell> {
        at.neighbors().filter_map(move |c| self.cell(c))
    }

    /// Cells `worker` could legally step onto. Empty if unplaced.
    #[must_use]
    pub fn available_move_cells(&self, worker: &Worker) -> Targets {
        let Some(from) = worker.position().and_then(|at| self.cell(at)) else {
            return Targets::new();
        };
        self.adjacent_cells(from.coordinate())
            .filter(|target| from.can_move_to(target))
            .map(Cell::coordinate)
            .collect()
    }

    /// Cells `worker` could legally build on. Empty if unplaced.
    #[must_use]
    pub fn available_build_cells(&self, worker: &Worker) -> Targets {
        let Some(from) = worker.position() else {
            return Targets::new();
        };
        self.adjacent_cells(from)
            .filter(|target| target.is_available_for_build())
            .map(Cell::coordinate)
            .collect()
    }

    /// Put a pre-built tower on a cell that has none yet. A worker may
    /// stand on it unless it carries a dome.
    pub fn place_tower(&mut self, at: Coordinate, tower: Tower) -> Result<(), SetupError> {
        let cell = self.cell_mut(at).ok_or(SetupError::OffBoard(at))?;
        if cell.tower().is_some() {
            return Err(SetupError::TowerExists(at));
        }
        if tower.has_dome() && cell.is_occupied() {
            return Err(SetupError::CellOccupied(at));
        }
        cell.set_tower(tower);
        Ok(())
    }

    /// One build step on `at`. Off-board counts as a failed build.
    pub(crate) fn build_at(&mut self, at: Coordinate) -> bool {
        self.cell_mut(at).is_some_and(Cell::build)
    }

    /// Move `worker` onto `to`, keeping cell and worker in agreement.
    ///
    /// Clears the worker's old cell, claims the new one and updates the
    /// worker's recorded position in one step. Fails without touching
    /// anything if `to` is off the board or held by another worker.
    pub(crate) fn relocate(&mut self, worker: &mut Worker, to: Coordinate) -> bool {
        let who = worker.reference();
        let Some(target) = self.index(to) else {
            return false;
        };
        if self.cells[target].occupant().is_some_and(|other| other != who) {
            return false;
        }

        if let Some(from) = worker.position().and_then(|at| self.index(at)) {
            self.cells[from].set_occupant(None);
        }
        self.cells[target].set_occupant(Some(who));
        worker.set_position(Some(to));
        true
    }

    /// Coordinates of free cells with no tower above level 0.
    pub(crate) fn empty_ground_cells(&self) -> Vec<Coordinate> {
        self.cells
            .iter()
            .filter(|cell| !cell.is_occupied() && cell.is_ground_level())
            .map(Cell::coordinate)
            .collect()
    }

    /// Seat every worker of every player on distinct empty ground cells.
    ///
    /// Picks a uniform random permutation of the eligible cells. Workers
    /// that were already placed leave their old cells.
    pub fn place_workers_randomly(
        &mut self,
        players: &mut PlayerMap<Player>,
        rng: &mut GameRng,
    ) -> Result<(), SetupError> {
        let mut available = self.empty_ground_cells();
        let needed: usize = players.values().map(|p| p.workers().len()).sum();
        if available.len() < needed {
            return Err(SetupError::NotEnoughSpace {
                needed,
                available: available.len(),
            });
        }

        rng.shuffle(&mut available);

        let mut slots = available.into_iter();
        for (_, player) in players.iter_mut() {
            for worker in player.workers_mut() {
                let Some(at) = slots.next() else {
                    return Err(SetupError::NotEnoughSpace { needed, available: 0 });
                };
                self.relocate(worker, at);
            }
        }
        Ok(())
    }

    pub(crate) fn hidden_cells_created(&self) -> bool {
        self.hidden_cells_created
    }

    pub(crate) fn mark_hidden_cells_created(&mut self) {
        self.hidden_cells_created = true;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                let mark = match (cell.has_dome(), cell.occupant()) {
                    (true, _) => 'X',
                    (false, Some(w)) => char::from(b'a' + w.player.0),
                    (false, None) => '.',
                };
                write!(f, "{}{}", cell.level(), mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PlayerId, WorkerId};

    fn worker_at(board: &mut Board, at: Coordinate) -> Worker {
        let mut worker = Worker::new(WorkerId::new(1), PlayerId::new(0));
        assert!(board.relocate(&mut worker, at));
        worker
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(Board::new(0, 5).is_err());
        assert!(Board::new(5, -1).is_err());

        let board = Board::new(3, 4).unwrap();
        assert_eq!(board.cells().count(), 12);
        assert_eq!(
            board.cell(Coordinate::new(2, 3)).map(Cell::coordinate),
            Some(Coordinate::new(2, 3))
        );
        assert!(board.cell(Coordinate::new(3, 0)).is_none());
    }

    #[test]
    fn test_adjacent_cells_respect_bounds() {
        let board = Board::new(5, 5).unwrap();

        assert_eq!(board.adjacent_cells(Coordinate::new(0, 0)).count(), 3);
        assert_eq!(board.adjacent_cells(Coordinate::new(0, 2)).count(), 5);
        assert_eq!(board.adjacent_cells(Coordinate::new(2, 2)).count(), 8);
    }

    #[test]
    fn test_perimeter() {
        let board = Board::new(5, 5).unwrap();
        assert!(board.is_perimeter(Coordinate::new(0, 3)));
        assert!(board.is_perimeter(Coordinate::new(4, 4)));
        assert!(board.is_perimeter(Coordinate::new(2, 0)));
        assert!(!board.is_perimeter(Coordinate::new(2, 2)));
        assert!(!board.is_perimeter(Coordinate::new(5, 0)));
    }

    #[test]
    fn test_relocate_keeps_both_sides_in_sync() {
        let mut board = Board::new(5, 5).unwrap();
        let mut worker = worker_at(&mut board, Coordinate::new(1, 1));

        assert!(board.relocate(&mut worker, Coordinate::new(1, 2)));
        assert_eq!(worker.position(), Some(Coordinate::new(1, 2)));
        assert!(!board.cell(Coordinate::new(1, 1)).unwrap().is_occupied());
        assert_eq!(
            board.cell(Coordinate::new(1, 2)).unwrap().occupant(),
            Some(worker.reference())
        );
    }

    #[test]
    fn test_relocate_refuses_occupied_and_off_board() {
        let mut board = Board::new(5, 5).unwrap();
        let mut first = worker_at(&mut board, Coordinate::new(0, 0));
        let mut second = Worker::new(WorkerId::new(2), PlayerId::new(0));
        assert!(board.relocate(&mut second, Coordinate::new(0, 1)));

        assert!(!board.relocate(&mut first, Coordinate::new(0, 1)));
        assert!(!board.relocate(&mut first, Coordinate::new(-1, 0)));
        assert_eq!(first.position(), Some(Coordinate::new(0, 0)));
    }

    #[test]
    fn test_available_move_cells() {
        let mut board = Board::new(5, 5).unwrap();
        board.place_tower(Coordinate::new(1, 2), Tower::with_level(2, false).unwrap()).unwrap();
        board.place_tower(Coordinate::new(2, 1), Tower::with_level(3, true).unwrap()).unwrap();
        board.place_tower(Coordinate::new(3, 3), Tower::with_level(1, false).unwrap()).unwrap();

        let worker = worker_at(&mut board, Coordinate::new(2, 2));
        let moves = board.available_move_cells(&worker);

        assert_eq!(moves.len(), 6);
        assert!(!moves.contains(&Coordinate::new(1, 2)));
        assert!(!moves.contains(&Coordinate::new(2, 1)));
        assert!(moves.contains(&Coordinate::new(3, 3)));
    }

    #[test]
    fn test_available_build_cells() {
        let mut board = Board::new(5, 5).unwrap();
        board.place_tower(Coordinate::new(0, 1), Tower::with_level(3, false).unwrap()).unwrap();
        board.place_tower(Coordinate::new(1, 0), Tower::with_level(3, true).unwrap()).unwrap();

        let worker = worker_at(&mut board, Coordinate::new(0, 0));
        let builds = board.available_build_cells(&worker);

        assert_eq!(builds.as_slice(), &[Coordinate::new(0, 1), Coordinate::new(1, 1)]);
    }

    #[test]
    fn test_unplaced_worker_has_no_targets() {
        let board = Board::new(5, 5).unwrap();
        let worker = Worker::new(WorkerId::new(1), PlayerId::new(0));

        assert!(board.available_move_cells(&worker).is_empty());
        assert!(board.available_build_cells(&worker).is_empty());
    }

    #[test]
    fn test_place_tower_only_once() {
        let mut board = Board::new(5, 5).unwrap();
        let at = Coordinate::new(4, 4);

        board.place_tower(at, Tower::new()).unwrap();
        assert_eq!(board.place_tower(at, Tower::new()), Err(SetupError::TowerExists(at)));
        assert_eq!(
            board.place_tower(Coordinate::new(9, 9), Tower::new()),
            Err(SetupError::OffBoard(Coordinate::new(9, 9)))
        );
    }

    #[test]
    fn test_place_tower_keeps_domes_off_workers() {
        let mut board = Board::new(5, 5).unwrap();
        let at = Coordinate::new(1, 1);
        worker_at(&mut board, at);

        assert_eq!(
            board.place_tower(at, Tower::with_level(3, true).unwrap()),
            Err(SetupError::CellOccupied(at))
        );
        assert_eq!(board.cell(at).unwrap().tower(), None);

        // A worker may stand on an open tower.
        board.place_tower(at, Tower::with_level(2, false).unwrap()).unwrap();
        assert_eq!(board.cell(at).unwrap().level(), 2);
    }

    #[test]
    fn test_place_workers_randomly() {
        let mut board = Board::new(5, 5).unwrap();
        let mut players = PlayerMap::new(2, |p| {
            let mut player = Player::new(format!("p{}", p.0));
            player.add_worker(Worker::new(WorkerId::new(1), p));
            player.add_worker(Worker::new(WorkerId::new(2), p));
            player
        });

        board
            .place_workers_randomly(&mut players, &mut GameRng::new(3))
            .unwrap();

        let occupied: Vec<_> = board.cells().filter(|c| c.is_occupied()).collect();
        assert_eq!(occupied.len(), 4);
        for (_, player) in players.iter() {
            for worker in player.workers() {
                let at = worker.position().unwrap();
                assert_eq!(board.cell(at).unwrap().occupant(), Some(worker.reference()));
            }
        }
    }

    #[test]
    fn test_place_workers_needs_ground_space() {
        let mut board = Board::new(1, 2).unwrap();
        board.place_tower(Coordinate::new(0, 1), Tower::with_level(1, false).unwrap()).unwrap();
        let mut players = PlayerMap::new(2, |p| {
            let mut player = Player::new(format!("p{}", p.0));
            player.add_worker(Worker::new(WorkerId::new(1), p));
            player
        });

        let result = board.place_workers_randomly(&mut players, &mut GameRng::new(1));
        assert_eq!(result, Err(SetupError::NotEnoughSpace { needed: 2, available: 1 }));
        assert!(board.cells().all(|c| !c.is_occupied()));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2, 2).unwrap();
        board.place_tower(Coordinate::new(0, 1), Tower::with_level(3, true).unwrap()).unwrap();
        let _worker = worker_at(&mut board, Coordinate::new(1, 0));

        assert_eq!(format!("{}", board), "0. 3X\n0a 0.\n");
    }
}
