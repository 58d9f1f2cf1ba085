use std::fmt;

/// A move identifier.
///
/// Moves are numbered column-major: `move = row + size * col`. The board
/// size is not stored in the move, so coordinate helpers take it explicitly.
/// ```text
/// 0 | 3 | 6
/// ---------
/// 1 | 4 | 7
/// ---------
/// 2 | 5 | 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Move(pub usize);

impl Move {
    /// Build a move from zero-based board coordinates.
    #[inline]
    pub const fn from_coords(row: usize, col: usize, size: usize) -> Self {
        Move(row + size * col)
    }

    /// Zero-based row on a board of the given size.
    #[inline]
    pub const fn row(self, size: usize) -> usize {
        self.0 % size
    }

    /// Zero-based column on a board of the given size.
    #[inline]
    pub const fn col(self, size: usize) -> usize {
        self.0 / size
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
