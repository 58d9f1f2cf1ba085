//! Connect-N Board - immutable N-in-a-row game model
//!
//! A [`GameState`] is a snapshot of an N×N grid, the side to move and the
//! run length needed to win. Applying a move always produces a new state.
//! Win detection scans every column, row and diagonal long enough to hold
//! a winning run; the line index lists are computed once per geometry and
//! shared between all states of a game.

mod geometry;
mod moves;
mod state;

pub use geometry::Geometry;
pub use moves::Move;
pub use state::GameState;
