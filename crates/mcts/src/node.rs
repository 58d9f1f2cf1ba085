//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to each other by index. A node owns
//! its state; the parent index is only a back link for backpropagation.

use connectn_board::{GameState, Move};
use connectn_core::Mark;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Statistics for a single MCTS node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of iterations that passed through this node.
    pub visit_count: u32,

    /// Sum of playout scores credited to this node.
    pub total_score: f64,
}

impl NodeStats {
    /// Mean score per visit, or 0.0 if the node has never been visited.
    pub fn mean_score(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_score / self.visit_count as f64
        }
    }

    /// UCB1 value of this node as a child of a parent with
    /// `ln_parent_visits = ln(N_parent)`.
    ///
    /// `sign` is the mover's mark value, putting the exploitation term in
    /// the mover's perspective:
    /// `sign * total / n + c * sqrt(ln(N_parent) / n)`
    pub fn ucb1(&self, sign: f64, ln_parent_visits: f64, exploration: f64) -> f64 {
        debug_assert!(self.visit_count > 0, "UCB1 evaluated on an unvisited node");
        let n = self.visit_count as f64;
        let exploit = sign * self.total_score / n;
        if exploration == 0.0 {
            exploit
        } else {
            exploit + exploration * (ln_parent_visits / n).sqrt()
        }
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// Position this node represents.
    pub state: GameState,

    /// Move that led to this node (None for root).
    pub incoming_move: Option<Move>,

    /// Parent node (None for root).
    pub parent: Option<NodeId>,

    /// Children: (move, node_id) pairs in expansion order.
    pub children: Vec<(Move, NodeId)>,

    /// Node statistics (visits, score).
    pub stats: NodeStats,

    /// Whether the position is won or drawn.
    pub terminal: bool,

    /// Whether every legal move has a child, or the node is terminal.
    pub fully_expanded: bool,
}

impl Node {
    /// Create a new unvisited node.
    pub fn new(state: GameState, incoming_move: Option<Move>, parent: Option<NodeId>) -> Self {
        let terminal = state.is_terminal();
        Self {
            state,
            incoming_move,
            parent,
            children: Vec::new(),
            stats: NodeStats::default(),
            terminal,
            fully_expanded: terminal,
        }
    }

    /// Create the root node.
    pub fn root(state: GameState) -> Self {
        Self::new(state, None, None)
    }

    /// The side that moved into this node's position.
    #[inline]
    pub fn mover(&self) -> Mark {
        self.state.last_mover()
    }

    /// Child reached by the given move, if it has been expanded.
    pub fn child(&self, mv: Move) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(m, _)| *m == mv)
            .map(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_stats_mean_score() {
        let mut stats = NodeStats::default();

        // Unvisited node scores 0
        assert_eq!(stats.mean_score(), 0.0);

        stats.visit_count = 4;
        stats.total_score = 3.0;
        assert!((stats.mean_score() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1_formula() {
        let stats = NodeStats {
            visit_count: 4,
            total_score: -2.0,
        };
        let ln_parent = (16.0f64).ln();

        // Pure exploitation flips the sign for the -1 mover
        assert!((stats.ucb1(-1.0, ln_parent, 0.0) - 0.5).abs() < 1e-12);

        let expected = -0.5 + (ln_parent / 4.0).sqrt();
        assert!((stats.ucb1(1.0, ln_parent, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_node_creation() {
        let state = GameState::connect_three();
        let node = Node::new(state.apply_move(Move(4)).unwrap(), Some(Move(4)), Some(NodeId::ROOT));

        assert_eq!(node.incoming_move, Some(Move(4)));
        assert_eq!(node.parent, Some(NodeId::ROOT));
        assert_eq!(node.mover(), Mark::A);
        assert!(!node.terminal);
        assert!(!node.fully_expanded);
        assert_eq!(node.stats.visit_count, 0);
        assert_eq!(node.stats.total_score, 0.0);
    }

    #[test]
    fn test_terminal_node_is_fully_expanded() {
        let x = Some(Mark::A);
        let o = Some(Mark::B);
        let won = GameState::from_cells(3, 3, vec![x, x, x, o, o, None, None, None, None]).unwrap();
        let node = Node::root(won);

        assert!(node.terminal);
        assert!(node.fully_expanded);
        assert_eq!(node.incoming_move, None);
    }
}
