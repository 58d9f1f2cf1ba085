//! Monte Carlo Tree Search implementation.
//!
//! Each iteration runs four phases:
//! 1. Selection: descend through fully expanded nodes by UCB1
//! 2. Expansion: add one untried move as a new child
//! 3. Rollout: random playout from the new node
//! 4. Backpropagation: update visits and scores back to the root
//!
//! Scores are kept in the global mark frame (`A` = +1, `B` = -1). A node is
//! credited with the playout score only when the side that moved into it
//! is the side the search was started for; UCB1 multiplies the mean by the
//! mover's mark value to read it back in the mover's perspective.

use crate::{
    config::MctsConfig,
    node::NodeId,
    rollout::rollout,
    tree::Tree,
};
use connectn_board::{GameState, Move};
use connectn_core::{ConnectNError, Mark, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

/// Statistics for one move at the root.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats {
    /// Move leading to the child.
    pub mv: Move,

    /// Number of iterations that went through the child.
    pub visits: u32,

    /// Mean score from the perspective of the side that played the move.
    pub value: f64,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Recommended move.
    pub best_move: Move,

    /// Position after playing the recommended move.
    pub state: GameState,

    /// Per-move statistics at the root, in expansion order.
    pub children: Vec<ChildStats>,

    /// Visits recorded at the root (one per iteration).
    pub root_visits: u32,

    /// Nodes allocated during the search.
    pub tree_size: usize,
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// The random source is injected so tests can seed it. Rollout move choice
/// and UCB1 tie-breaks both draw from it.
pub struct Mcts<R: Rng> {
    config: MctsConfig,
    rng: R,
}

impl<R: Rng> Mcts<R> {
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, rng: R) -> Self {
        Self { config, rng }
    }

    /// Search from `state` and return the position after the best move.
    ///
    /// # Errors
    /// Returns `ConnectNError::NoLegalMoves` if `state` is already won or
    /// drawn, and `ConnectNError::InvalidConfig` for an unusable config.
    pub fn search(&mut self, state: &GameState) -> Result<GameState> {
        self.analyze(state).map(|result| result.state)
    }

    /// Search from `state` and return the full root statistics.
    ///
    /// The tree is built from scratch and dropped before returning.
    ///
    /// # Errors
    /// Same as [`Mcts::search`].
    pub fn analyze(&mut self, state: &GameState) -> Result<SearchResult> {
        self.config.validate()?;
        if state.is_terminal() {
            return Err(ConnectNError::NoLegalMoves);
        }

        let root_side = state.side_to_move();
        let mut tree = Tree::new(state.clone());

        for iteration in 0..self.config.iterations {
            let leaf = self.select(&mut tree, NodeId::ROOT)?;
            let outcome = rollout(&tree.get(leaf).state, &mut self.rng);
            backpropagate(&mut tree, leaf, outcome.score(), root_side);

            trace!(
                iteration,
                leaf = leaf.0,
                score = outcome.score(),
                "MCTS iteration complete"
            );
        }

        let result = self.extract_results(&tree)?;

        debug!(
            iterations = self.config.iterations,
            tree_size = result.tree_size,
            best_move = result.best_move.0,
            side = %root_side,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// Walk down from `node` to the node the next rollout should start from.
    ///
    /// Fully expanded nodes are descended by UCB1; the first node with an
    /// untried move is expanded and the new child returned. Terminal nodes
    /// are returned as they are.
    fn select(&mut self, tree: &mut Tree, node: NodeId) -> Result<NodeId> {
        let mut current = node;

        while !tree.get(current).terminal {
            if tree.get(current).fully_expanded {
                current = self
                    .best_child(tree, current, self.config.exploration)
                    .ok_or(ConnectNError::NoLegalMoves)?;
            } else {
                return expand(tree, current);
            }
        }

        Ok(current)
    }

    /// Child of `node` with the highest UCB1 value.
    ///
    /// Ties are broken uniformly at random. Returns `None` if the node has
    /// no children.
    fn best_child(&mut self, tree: &Tree, node: NodeId, exploration: f64) -> Option<NodeId> {
        let parent = tree.get(node);
        let ln_parent_visits = (parent.stats.visit_count as f64).ln();

        let mut best_value = f64::NEG_INFINITY;
        let mut best: Vec<NodeId> = Vec::new();

        for &(_, child_id) in &parent.children {
            let child = tree.get(child_id);
            let sign = f64::from(child.mover().value());
            let value = child.stats.ucb1(sign, ln_parent_visits, exploration);

            if value > best_value {
                best_value = value;
                best.clear();
                best.push(child_id);
            } else if value == best_value {
                best.push(child_id);
            }
        }

        best.choose(&mut self.rng).copied()
    }

    /// Pick the final move with the root exploration constant.
    fn extract_results(&mut self, tree: &Tree) -> Result<SearchResult> {
        let best_id = self
            .best_child(tree, NodeId::ROOT, self.config.final_exploration)
            .ok_or(ConnectNError::NoLegalMoves)?;
        let best = tree.get(best_id);

        let root = tree.root();
        let children = root
            .children
            .iter()
            .map(|&(mv, id)| {
                let child = tree.get(id);
                ChildStats {
                    mv,
                    visits: child.stats.visit_count,
                    value: f64::from(child.mover().value()) * child.stats.mean_score(),
                }
            })
            .collect();

        Ok(SearchResult {
            best_move: best
                .incoming_move
                .expect("BUG: non-root node without incoming move"),
            state: best.state.clone(),
            children,
            root_visits: root.stats.visit_count,
            tree_size: tree.len(),
        })
    }
}

/// Add a child for the first legal move of `node` that has none yet.
///
/// Marks the node fully expanded once every legal move has a child.
///
/// # Errors
/// Returns `ConnectNError::NoLegalMoves` if the node is terminal or has no
/// untried move left.
fn expand(tree: &mut Tree, node: NodeId) -> Result<NodeId> {
    if tree.get(node).terminal || tree.get(node).fully_expanded {
        return Err(ConnectNError::NoLegalMoves);
    }

    let legal = tree.get(node).state.generate_legal_moves();
    let num_legal = legal.len();

    let (mv, state) = legal
        .into_iter()
        .find(|(mv, _)| tree.get(node).child(*mv).is_none())
        .ok_or(ConnectNError::NoLegalMoves)?;

    let child = tree.add_child(node, mv, state);
    if tree.get(node).children.len() == num_legal {
        tree.get_mut(node).fully_expanded = true;
    }

    Ok(child)
}

/// Record one playout on every node from `leaf` up to the root.
///
/// Every node gains a visit. The score is added only to nodes whose mover
/// is `root_side`.
fn backpropagate(tree: &mut Tree, leaf: NodeId, score: i8, root_side: Mark) {
    let mut current = Some(leaf);

    while let Some(id) = current {
        let node = tree.get_mut(id);
        node.stats.visit_count += 1;
        if node.mover() == root_side {
            node.stats.total_score += f64::from(score);
        }
        current = node.parent;
    }
}
