//! Eagerly expanded, depth-bounded search tree
//!
//! Nodes live in an arena addressed by [`NodeId`]; parents and children are
//! stored as ids, so the structure is a strict out-tree with no ownership
//! cycles. The root is always [`NodeId::ROOT`].

use std::collections::{HashSet, VecDeque};

use super::node::Node;
use crate::{
    error::{Error, Result},
    identifiers::NodeId,
    taxi::{Action, ActionCatalog},
    types::{ActionMask, Observation},
};

/// Deepest tree the search accepts.
///
/// Trees are built eagerly, so memory grows as `5^depth`. A five-action tree
/// of this depth holds about 2.4 million nodes; with each node's path label
/// and child list on the heap that is roughly 200 bytes per node, or about
/// half a gigabyte for a single decision. Depth 6 needs about 4 MB.
pub const MAX_SEARCH_DEPTH: usize = 9;

/// Number of non-root nodes in a full tree: `Σ_{i=1..depth} branching^i`.
pub fn full_tree_size(branching: usize, depth: usize) -> usize {
    (1..=depth)
        .map(|level| branching.pow(level as u32))
        .sum()
}

/// Search tree for one decision.
///
/// Built fully at construction time, driven once by
/// [`super::traversal::TreeTraversal`], then discarded.
#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
    actions: Vec<Action>,
    max_depth: usize,
    pub(crate) frontier: VecDeque<NodeId>,
    pub(crate) visited_states: HashSet<usize>,
    pub(crate) winning_node: Option<NodeId>,
    pub(crate) deepest_frontier: Vec<NodeId>,
    pub(crate) visited_count: usize,
}

impl SearchTree {
    /// Build the full tree below `root` using `actions` at every level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `max_depth` is zero or above
    /// [`MAX_SEARCH_DEPTH`], if `actions` is empty, or if the root carries no
    /// world state.
    pub fn new(root: Node, actions: &[Action], max_depth: usize) -> Result<Self> {
        validate_depth(max_depth)?;
        if actions.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "search tree needs at least one action".to_string(),
            });
        }
        let Some(root_state) = root.state else {
            return Err(Error::InvalidConfiguration {
                message: "search tree root must carry a world state".to_string(),
            });
        };

        let mut tree = Self {
            nodes: Vec::with_capacity(full_tree_size(actions.len(), max_depth) + 1),
            actions: actions.to_vec(),
            max_depth,
            frontier: VecDeque::new(),
            visited_states: HashSet::from([root_state]),
            winning_node: None,
            deepest_frontier: Vec::new(),
            visited_count: 0,
        };
        tree.nodes.push(Node {
            action: None,
            path: String::new(),
            depth: 0,
            parent: None,
            children: Vec::new(),
            ..root
        });
        tree.expand();
        Ok(tree)
    }

    /// Build a tree rooted at a state, searching the action subset of a stage.
    pub fn for_stage(
        state: usize,
        observation: Observation,
        stage: super::Stage,
        max_depth: usize,
    ) -> Result<Self> {
        Self::new(Node::root(state, observation), stage.actions(), max_depth)
    }

    /// Materialize every descendant level by level, so ids follow
    /// breadth-first order and siblings follow action order.
    fn expand(&mut self) {
        let mut next = 0;
        while next < self.nodes.len() {
            let parent = NodeId::new(next);
            let depth = self.nodes[next].depth;
            if depth < self.max_depth {
                for i in 0..self.actions.len() {
                    let child = Node::child(parent, depth, self.actions[i]);
                    let id = NodeId::new(self.nodes.len());
                    self.nodes.push(child);
                    self.nodes[next].children.push(id);
                }
            }
            next += 1;
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[0]
    }

    /// Look up a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if the id was not issued by this tree.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(Error::UnknownNode {
            id: id.index(),
            len: self.nodes.len(),
        })
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(id.index())
            .ok_or(Error::UnknownNode { id: id.index(), len })
    }

    /// Total node count, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes below the root.
    pub fn decision_node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// First node found satisfying the stage goal, if any.
    pub fn winning_node(&self) -> Option<NodeId> {
        self.winning_node
    }

    /// Nodes visited at `max_depth` without meeting the goal.
    pub fn deepest_frontier(&self) -> &[NodeId] {
        &self.deepest_frontier
    }

    /// Nodes visited by the traversal so far (the root is not counted).
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn visited_states(&self) -> &HashSet<usize> {
        &self.visited_states
    }

    /// Nodes still waiting in the breadth-first queue.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Whether a traversal has already consumed this tree.
    pub fn is_traversed(&self) -> bool {
        self.visited_count > 0 || self.winning_node.is_some()
    }

    /// Record the immediate reward of a node and derive its cumulative reward
    /// from its parent's.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnvisitedParent`] if the parent has not been visited,
    /// since its cumulative reward is not yet defined.
    pub fn update_reward(&mut self, id: NodeId, immediate_reward: f64) -> Result<()> {
        let node = self.node(id)?;
        let base = match node.parent {
            Some(parent_id) => {
                let parent = self.node(parent_id)?;
                if !parent.is_visited() {
                    return Err(Error::UnvisitedParent {
                        path: self.full_path(id)?,
                    });
                }
                parent.cumulative_reward
            }
            None => 0.0,
        };

        let node = self.node_mut(id)?;
        node.reward = immediate_reward;
        node.cumulative_reward = immediate_reward + base;
        Ok(())
    }

    /// Store the world state reached when visiting a node.
    pub(crate) fn record_visit(
        &mut self,
        id: NodeId,
        state: usize,
        observation: Observation,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        node.state = Some(state);
        node.observation = Some(observation);
        Ok(())
    }

    /// Drop every child whose action is illegal under `mask`.
    ///
    /// Returns the number of children removed. Children are never added back,
    /// so repeated calls with the same mask remove nothing further.
    pub fn restrict_children(&mut self, id: NodeId, mask: &ActionMask) -> Result<usize> {
        let children = self.node(id)?.children.clone();
        let kept: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|&child| {
                self.nodes[child.index()]
                    .action
                    .is_some_and(|action| mask.is_legal(action))
            })
            .collect();
        let removed = children.len() - kept.len();
        self.node_mut(id)?.children = kept;
        Ok(removed)
    }

    /// Ids from the root down to `id`, both included.
    pub fn lineage(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut lineage = vec![id];
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            lineage.push(parent);
            current = self.node(parent)?;
        }
        lineage.reverse();
        Ok(lineage)
    }

    /// Concatenated path labels from the root to `id`, e.g. `"1C2A3E"`.
    pub fn full_path(&self, id: NodeId) -> Result<String> {
        let mut path = String::new();
        for ancestor in self.lineage(id)? {
            path.push_str(&self.node(ancestor)?.path);
        }
        Ok(path)
    }

    /// Actions along the path to `id`, parsed from [`Self::full_path`].
    pub fn action_sequence(&self, id: NodeId) -> Result<Vec<Action>> {
        ActionCatalog::parse_path(&self.full_path(id)?)
    }

    /// The depth-1 node on the path to `id`: the single actionable next step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RootHasNoAncestor`] when called on the root.
    pub fn ancestor_at_depth_one(&self, id: NodeId) -> Result<NodeId> {
        let mut current_id = id;
        let mut current = self.node(id)?;
        if current.depth == 0 {
            return Err(Error::RootHasNoAncestor);
        }
        while current.depth > 1 {
            let parent = current.parent.ok_or(Error::RootHasNoAncestor)?;
            current_id = parent;
            current = self.node(parent)?;
        }
        Ok(current_id)
    }

    /// Iterate over every node with its id.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }
}

pub(crate) fn validate_depth(max_depth: usize) -> Result<()> {
    if max_depth == 0 {
        return Err(Error::InvalidConfiguration {
            message: "max depth must be at least 1".to_string(),
        });
    }
    if max_depth > MAX_SEARCH_DEPTH {
        return Err(Error::InvalidConfiguration {
            message: format!("max depth {max_depth} exceeds the limit of {MAX_SEARCH_DEPTH}"),
        });
    }
    Ok(())
}
