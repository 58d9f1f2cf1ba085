//! Board geometry and precomputed scan lines.

use connectn_core::{ConnectNError, Result};

/// Board dimensions plus every line that could hold a winning run.
///
/// Lines are lists of row-major cell indices, in scan order. Columns come
/// first, then rows, then the two diagonal families. Diagonals shorter than
/// the run length are skipped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    size: usize,
    run_length: usize,
    lines: Vec<Vec<usize>>,
}

impl Geometry {
    /// Create the geometry for a `size`×`size` board needing `run_length` in a row.
    ///
    /// # Errors
    /// Returns `ConnectNError::InvalidGeometry` if either value is zero or the
    /// run cannot fit on the board.
    pub fn new(size: usize, run_length: usize) -> Result<Self> {
        if size == 0 || run_length == 0 || run_length > size {
            return Err(ConnectNError::InvalidGeometry { size, run_length });
        }

        let index = |row: usize, col: usize| row * size + col;
        let mut lines = Vec::with_capacity(6 * size);

        // Down each column
        for col in 0..size {
            lines.push((0..size).map(|row| index(row, col)).collect());
        }

        // Across each row
        for row in 0..size {
            lines.push((0..size).map(|col| index(row, col)).collect());
        }

        // Diagonals by offset p; q walks the overlap with the grid
        for p in 0..(2 * size - 1) {
            let q_range = p.saturating_sub(size - 1)..(p + 1).min(size);
            if q_range.len() < run_length {
                continue;
            }
            let diag: Vec<usize> = q_range
                .clone()
                .map(|q| index(size + q - p - 1, q))
                .collect();
            let anti_diag: Vec<usize> = q_range.map(|q| index(p - q, q)).collect();
            lines.push(diag);
            lines.push(anti_diag);
        }

        Ok(Self {
            size,
            run_length,
            lines,
        })
    }

    /// Board edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Marks in a row needed to win.
    #[inline]
    pub fn run_length(&self) -> usize {
        self.run_length
    }

    /// Total number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.size * self.size
    }

    /// All scan lines long enough to contain a winning run.
    pub fn lines(&self) -> &[Vec<usize>] {
        &self.lines
    }
}
