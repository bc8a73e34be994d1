//! Breadth-first driver of a [`SearchTree`]
//!
//! Every visit restores the environment to the parent's recorded state before
//! replaying the node's action, so only one simulated trajectory is live in the
//! environment at any time.

use tracing::{debug, info, trace};

use super::{stage::Stage, tree::SearchTree};
use crate::{
    error::{Error, Result},
    identifiers::NodeId,
    ports::Environment,
};

/// How a single visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Goal met; the traversal stops here
    Goal,
    /// Children were appended to the frontier
    Expanded,
    /// The action was illegal at the parent; recorded but not expanded
    Illegal,
    /// The transition looped back to a state already seen in this tree
    Revisited,
    /// Leaf at the depth limit
    Leaf,
}

/// Runs the goal-directed breadth-first search of one stage.
#[derive(Debug, Clone, Copy)]
pub struct TreeTraversal {
    stage: Stage,
}

impl TreeTraversal {
    pub fn new(stage: Stage) -> Self {
        Self { stage }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Drive `tree` to completion against `env`.
    ///
    /// Returns the winning node, if the stage goal was reached. When it is
    /// not, the fallback candidates are left in
    /// [`SearchTree::deepest_frontier`]. The environment is left in whatever
    /// state the last visit produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TreeAlreadyTraversed`] if the tree was driven before,
    /// and propagates environment failures from restoring a state.
    pub fn run<E>(&self, tree: &mut SearchTree, env: &mut E) -> Result<Option<NodeId>>
    where
        E: Environment + ?Sized,
    {
        if tree.is_traversed() {
            return Err(Error::TreeAlreadyTraversed);
        }

        let root = tree.root();
        tree.frontier = tree.node(root)?.children().iter().copied().collect();
        debug!(
            stage = %self.stage,
            max_depth = tree.max_depth(),
            frontier = tree.frontier.len(),
            "starting traversal"
        );

        while let Some(id) = tree.frontier.pop_front() {
            let outcome = self.visit(tree, env, id)?;
            if outcome == VisitOutcome::Goal {
                tree.frontier.clear();
                break;
            }
        }

        debug!(
            visited = tree.visited_count,
            distinct_states = tree.visited_states.len(),
            deepest = tree.deepest_frontier.len(),
            won = tree.winning_node.is_some(),
            "traversal finished"
        );
        Ok(tree.winning_node)
    }

    fn visit<E>(&self, tree: &mut SearchTree, env: &mut E, id: NodeId) -> Result<VisitOutcome>
    where
        E: Environment + ?Sized,
    {
        let node = tree.node(id)?;
        let (Some(action), Some(parent_id)) = (node.action(), node.parent()) else {
            return Err(Error::RootHasNoAncestor);
        };
        let depth = node.depth();
        let parent = tree.node(parent_id)?;
        let (Some(parent_state), Some(parent_observation)) =
            (parent.state(), parent.observation().copied())
        else {
            return Err(Error::UnvisitedParent {
                path: tree.full_path(id)?,
            });
        };

        // Restore, then replay
        env.reset_to(parent_state)?;
        let transition = env.step(action);

        let illegal = !parent_observation.action_mask.is_legal(action);
        let revisited = tree.visited_states.contains(&transition.state);

        tree.visited_count += 1;
        tree.visited_states.insert(transition.state);
        tree.update_reward(id, transition.reward)?;
        tree.record_visit(id, transition.state, transition.observation)?;
        let pruned = tree.restrict_children(id, &transition.observation.action_mask)?;

        let label = tree.node(id)?.path().to_string();
        trace!(
            node = %id,
            path = %label,
            from = parent_state,
            to = transition.state,
            %action,
            reward = transition.reward,
            illegal,
            revisited,
            pruned,
            "visited node"
        );

        if self.stage.goal_met(env, transition.state) {
            tree.winning_node = Some(id);
            let path = tree.full_path(id)?;
            let cumulative_reward = tree.node(id)?.cumulative_reward();
            info!(
                stage = %self.stage,
                %path,
                cumulative_reward,
                visited = tree.visited_count,
                "goal reached"
            );
            return Ok(VisitOutcome::Goal);
        }

        if depth == tree.max_depth() {
            tree.deepest_frontier.push(id);
        }

        let outcome = if illegal {
            VisitOutcome::Illegal
        } else if revisited {
            VisitOutcome::Revisited
        } else if depth == tree.max_depth() {
            VisitOutcome::Leaf
        } else {
            let children = tree.node(id)?.children().to_vec();
            tree.frontier.extend(children);
            VisitOutcome::Expanded
        };
        debug!(node = %id, ?outcome, "visit outcome");
        Ok(outcome)
    }
}
