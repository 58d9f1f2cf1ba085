//! Side and outcome types.
//!
//! Both sides carry a fixed numeric value: `A` is +1 and `B` is -1. Scores
//! produced by playouts are always expressed in this global frame, never
//! relative to whoever happens to be searching.

use std::fmt;

/// One of the two sides.
///
/// `A` moves first on an empty board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    A,
    B,
}

impl Mark {
    /// Get the opposing side.
    pub fn opposite(self) -> Self {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }

    /// Numeric mark value: +1 for `A`, -1 for `B`.
    pub fn value(self) -> i8 {
        match self {
            Mark::A => 1,
            Mark::B => -1,
        }
    }

    /// Board symbol used when rendering.
    pub fn symbol(self) -> char {
        match self {
            Mark::A => 'x',
            Mark::B => 'o',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

impl Outcome {
    /// Score in the global mark-value frame.
    ///
    /// A win scores the winner's mark value, a draw scores 0.
    pub fn score(self) -> i8 {
        match self {
            Outcome::Win(mark) => mark.value(),
            Outcome::Draw => 0,
        }
    }

    /// The winning side, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(mark),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "player \"{}\" wins", mark),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
