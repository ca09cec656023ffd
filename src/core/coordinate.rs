//! Board coordinates with Chebyshev adjacency.
//!
//! A `Coordinate` is a plain `(row, col)` pair. It knows nothing about
//! board bounds; `Board` decides which coordinates exist.
//!
//! ```
//! use santorini::core::Coordinate;
//!
//! let a = Coordinate::new(2, 2);
//! assert!(a.is_adjacent(Coordinate::new(3, 3)));
//! assert!(!a.is_adjacent(a));
//! assert_eq!(a.distance_to(Coordinate::new(0, 4)), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Row/column position on the board.
///
/// Signed so that neighbor arithmetic can step off the board and be
/// rejected by the bounds check instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index (0-based).
    pub row: i32,
    /// Column index (0-based).
    pub col: i32,
}

/// Offsets of the 8-neighborhood, row-major.
pub(crate) const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

impl Coordinate {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Chebyshev distance: the larger of the row and column deltas.
    #[must_use]
    pub fn distance_to(self, other: Coordinate) -> u32 {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr.max(dc)
    }

    /// True iff `other` is one of the 8 surrounding coordinates.
    #[must_use]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.distance_to(other) == 1
    }

    /// The 8 surrounding coordinates, unbounded.
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dr, dc)| Coordinate::new(self.row + dr, self.col + dc))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
