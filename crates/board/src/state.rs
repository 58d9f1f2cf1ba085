//! Immutable game state.

use std::fmt;
use std::sync::Arc;

use connectn_core::{ConnectNError, Mark, Outcome, Result};

use crate::{Geometry, Move};

/// A connect-n position.
///
/// Cells are stored row-major. The side to move is always derivable from
/// the parity of occupied cells (even count means `A` to move) and is kept
/// alongside for cheap access. States are never mutated once built:
/// [`GameState::apply_move`] clones the cells and shares the geometry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    geometry: Arc<Geometry>,
    cells: Vec<Option<Mark>>,
    side_to_move: Mark,
    occupied: usize,
}

impl GameState {
    /// Create an empty board with `A` to move.
    ///
    /// # Errors
    /// Returns `ConnectNError::InvalidGeometry` if the run length is zero or
    /// longer than the board edge.
    pub fn new(size: usize, run_length: usize) -> Result<Self> {
        let geometry = Geometry::new(size, run_length)?;
        Ok(Self {
            cells: vec![None; geometry.num_cells()],
            geometry: Arc::new(geometry),
            side_to_move: Mark::A,
            occupied: 0,
        })
    }

    /// Empty 3×3 board needing three in a row.
    pub fn connect_three() -> Self {
        Self::new(3, 3).expect("BUG: 3x3 connect-3 geometry is always valid")
    }

    /// Build a position from a row-major grid.
    ///
    /// The side to move is derived from the number of occupied cells, so
    /// `A` must have made as many moves as `B`, or exactly one more.
    ///
    /// # Errors
    /// Returns an error if the geometry is invalid, the grid has the wrong
    /// number of cells, or the mark counts cannot arise from alternating play.
    pub fn from_cells(size: usize, run_length: usize, cells: Vec<Option<Mark>>) -> Result<Self> {
        let geometry = Geometry::new(size, run_length)?;
        if cells.len() != geometry.num_cells() {
            return Err(ConnectNError::InvalidBoard(format!(
                "expected {} cells, got {}",
                geometry.num_cells(),
                cells.len()
            )));
        }

        let count_a = cells.iter().filter(|c| **c == Some(Mark::A)).count();
        let count_b = cells.iter().filter(|c| **c == Some(Mark::B)).count();
        if count_a != count_b && count_a != count_b + 1 {
            return Err(ConnectNError::InvalidBoard(format!(
                "mark counts x={} o={} cannot arise from alternating play",
                count_a, count_b
            )));
        }

        let occupied = count_a + count_b;
        Ok(Self {
            geometry: Arc::new(geometry),
            cells,
            side_to_move: side_for_parity(occupied),
            occupied,
        })
    }

    /// Board edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.geometry.size()
    }

    /// Marks in a row needed to win.
    #[inline]
    pub fn run_length(&self) -> usize {
        self.geometry.run_length()
    }

    /// The side whose mark the next move places.
    #[inline]
    pub fn side_to_move(&self) -> Mark {
        self.side_to_move
    }

    /// The side that made the previous move.
    ///
    /// On an empty board this is `B`, the side that would have moved last.
    #[inline]
    pub fn last_mover(&self) -> Mark {
        self.side_to_move.opposite()
    }

    /// Number of non-empty cells.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Row-major view of the grid.
    pub fn cells(&self) -> &[Option<Mark>] {
        &self.cells
    }

    /// Mark at the given zero-based coordinates, if any.
    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        if row >= self.size() || col >= self.size() {
            return None;
        }
        self.cells[row * self.size() + col]
    }

    /// Apply a move, returning the resulting state.
    ///
    /// # Errors
    /// Returns `ConnectNError::InvalidMove` if the move is off the board or
    /// targets an occupied cell.
    pub fn apply_move(&self, mv: Move) -> Result<GameState> {
        let size = self.size();
        if mv.0 >= self.geometry.num_cells() {
            return Err(ConnectNError::InvalidMove(format!(
                "move {} is outside the {}x{} board",
                mv, size, size
            )));
        }

        let index = mv.row(size) * size + mv.col(size);
        if let Some(mark) = self.cells[index] {
            return Err(ConnectNError::InvalidMove(format!(
                "cell (row {}, col {}) is already taken by \"{}\"",
                mv.row(size) + 1,
                mv.col(size) + 1,
                mark
            )));
        }

        let mut cells = self.cells.clone();
        cells[index] = Some(self.side_to_move);
        let occupied = self.occupied + 1;

        Ok(GameState {
            geometry: Arc::clone(&self.geometry),
            cells,
            side_to_move: side_for_parity(occupied),
            occupied,
        })
    }

    /// True if the side that just moved has a winning run.
    ///
    /// Only the last mover is checked; wins are detected immediately after
    /// the move that creates them.
    pub fn is_win(&self) -> bool {
        let mover = Some(self.last_mover());
        let run_length = self.run_length();

        self.geometry.lines().iter().any(|line| {
            let mut count = 0;
            for &index in line {
                if self.cells[index] == mover {
                    count += 1;
                    if count == run_length {
                        return true;
                    }
                } else {
                    count = 0;
                }
            }
            false
        })
    }

    /// True if every cell is occupied.
    ///
    /// This does not look for a win: a full board with a winning line is
    /// also a draw by this test, so check [`GameState::is_win`] first.
    pub fn is_draw(&self) -> bool {
        self.occupied == self.cells.len()
    }

    /// True if the game is over.
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_draw()
    }

    /// Result of the game, or `None` while it is still going.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_win() {
            Some(Outcome::Win(self.last_mover()))
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// The winning side, if the last move won.
    pub fn winner(&self) -> Option<Mark> {
        self.outcome().and_then(Outcome::winner)
    }

    /// Legal moves in row-major scan order.
    ///
    /// Moves are still listed after a win; only a full board yields none.
    pub fn legal_moves(&self) -> Vec<Move> {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| Move::from_coords(index / size, index % size, size))
            .collect()
    }

    /// Legal moves paired with the states they produce, in row-major scan order.
    pub fn generate_legal_moves(&self) -> Vec<(Move, GameState)> {
        self.legal_moves()
            .into_iter()
            .map(|mv| {
                let next = self
                    .apply_move(mv)
                    .expect("BUG: legal_moves returned an occupied cell");
                (mv, next)
            })
            .collect()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::connect_three()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--------------")?;
        writeln!(f, " \"{}\" to move:", self.side_to_move)?;
        writeln!(f, "--------------")?;
        writeln!(f)?;
        for row in 0..self.size() {
            for col in 0..self.size() {
                match self.cell(row, col) {
                    Some(mark) => write!(f, " {}", mark)?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Side to move after `occupied` marks have been placed.
fn side_for_parity(occupied: usize) -> Mark {
    if occupied % 2 == 0 {
        Mark::A
    } else {
        Mark::B
    }
}
