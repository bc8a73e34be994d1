//! Search tree vertex

use std::fmt;

use crate::{identifiers::NodeId, taxi::Action, types::Observation};

/// A vertex of the search tree.
///
/// The structural fields (action, path label, depth, parent, children) are fixed
/// when the tree is built; the payload (state, observation, rewards) stays empty
/// until the traversal visits the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub(crate) action: Option<Action>,
    pub(crate) path: String,
    pub(crate) depth: usize,
    pub(crate) state: Option<usize>,
    pub(crate) observation: Option<Observation>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) reward: f64,
    pub(crate) cumulative_reward: f64,
}

impl Node {
    /// Create a root from a known world state.
    pub fn root(state: usize, observation: Observation) -> Self {
        Self {
            action: None,
            path: String::new(),
            depth: 0,
            state: Some(state),
            observation: Some(observation),
            parent: None,
            children: Vec::new(),
            reward: 0.0,
            cumulative_reward: 0.0,
        }
    }

    /// Unvisited child reached from `parent` by `action`.
    pub(crate) fn child(parent: NodeId, parent_depth: usize, action: Action) -> Self {
        let depth = parent_depth + 1;
        Self {
            action: Some(action),
            path: format!("{depth}{}", action.to_letter()),
            depth,
            state: None,
            observation: None,
            parent: Some(parent),
            children: Vec::new(),
            reward: 0.0,
            cumulative_reward: 0.0,
        }
    }

    /// Copy of this node as the root of a new tree.
    ///
    /// World state and rewards carry over, so cumulative rewards in the new
    /// tree continue the episode total. Structure is dropped; the old tree's
    /// ids are never carried over. Returns `None` if the node was never
    /// visited.
    pub fn detach(&self) -> Option<Node> {
        Some(Node {
            reward: self.reward,
            cumulative_reward: self.cumulative_reward,
            ..Node::root(self.state?, self.observation?)
        })
    }

    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Per-edge label, e.g. `"2C"` for EAST taken at depth 2.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn state(&self) -> Option<usize> {
        self.state
    }

    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether the node carries a world state (roots always do).
    pub fn is_visited(&self) -> bool {
        self.state.is_some()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_root() { "root" } else { &self.path };
        match self.state {
            Some(state) => write!(
                f,
                "[Node {label}] state={state} reward={} cumulative={}",
                self.reward, self.cumulative_reward
            ),
            None => write!(f, "[Node {label}] unvisited"),
        }
    }
}
