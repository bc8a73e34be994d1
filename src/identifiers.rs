//! Identifier types for search tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a node in a [`crate::search::SearchTree`] arena.
///
/// Ids are only meaningful for the tree that issued them; a tree is discarded
/// after each decision, and so are its ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Id of the root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}
