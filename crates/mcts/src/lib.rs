//! Monte Carlo Tree Search for connect-n.
//!
//! This crate searches [`connectn_board::GameState`] positions with plain
//! UCB1 MCTS: uniform random rollouts, one child expanded per iteration,
//! and a fixed iteration budget as the only stopping condition.
//!
//! # Example
//!
//! ```
//! use connectn_board::GameState;
//! use connectn_mcts::{Mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let state = GameState::connect_three();
//!
//! let config = MctsConfig::with_iterations(200);
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(config, rng);
//!
//! let next = mcts.search(&state).expect("empty board has moves");
//! assert_eq!(next.occupied(), 1);
//! ```

pub mod config;
mod node;
mod rollout;
pub mod search;
mod tree;

pub use config::MctsConfig;
pub use rollout::rollout;
pub use search::{ChildStats, Mcts, SearchResult};
