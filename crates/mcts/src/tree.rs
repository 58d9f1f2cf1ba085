//! Arena-allocated MCTS tree.
//!
//! Nodes are stored in a Vec and referenced by index. Children are owned
//! through the arena; parent links are plain indices, so dropping the tree
//! drops every node at once.

use crate::node::{Node, NodeId};
use connectn_board::{GameState, Move};

/// Arena-allocated MCTS tree.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a new tree whose root wraps the given state.
    pub fn new(root_state: GameState) -> Self {
        Self {
            nodes: vec![Node::root(root_state)],
        }
    }

    /// Get a reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node by ID.
    ///
    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Create a child of `parent` reached by `mv`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, mv: Move, state: GameState) -> NodeId {
        debug_assert!(
            self.get(parent).child(mv).is_none(),
            "move {} expanded twice",
            mv
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, Some(mv), Some(parent)));
        self.get_mut(parent).children.push((mv, id));
        id
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Get the root node.
    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }
}
