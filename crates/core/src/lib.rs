//! Connect-N Core - shared types and errors
//!
//! This crate holds the vocabulary shared by the board model, the search
//! engine and the terminal front end.
//!
//! # Types
//!
//! - [`Mark`] - One of the two sides, with its fixed numeric value (+1 / -1)
//! - [`Outcome`] - Result of a finished game (a win for one mark, or a draw)

mod error;
mod types;

pub use error::{ConnectNError, Result};
pub use types::{Mark, Outcome};
