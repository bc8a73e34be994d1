//! Stage-driven controller committing one searched step at a time

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    node::Node,
    stage::Stage,
    traversal::TreeTraversal,
    tree::{SearchTree, validate_depth},
};
use crate::{
    error::{Error, Result},
    identifiers::NodeId,
    ports::{Decision, Environment, Policy, RunStatus},
    taxi::Action,
    utils::{build_rng, choose_max},
};

/// Default number of simulated steps per decision.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Configuration for a [`SearchController`].
///
/// # Examples
///
/// ```
/// use taxi_driver::search::SearchConfig;
///
/// let config = SearchConfig::new(4).with_seed(42);
/// assert_eq!(config.max_depth, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Depth of every search tree
    pub max_depth: usize,
    /// Seed of the fallback tie-break
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration before any environment interaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a depth of zero or a depth
    /// above [`super::MAX_SEARCH_DEPTH`].
    pub fn validate(&self) -> Result<()> {
        validate_depth(self.max_depth)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

/// Result of searching one decision, before it is committed.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    /// The fully traversed tree
    pub tree: SearchTree,
    /// Winning node, or the fallback pick from the deepest frontier
    pub selected: NodeId,
    /// Depth-1 ancestor of `selected`: the step that gets committed
    pub step: NodeId,
    /// Whether `selected` satisfies the stage goal
    pub won: bool,
}

/// Goal-directed taxi driver.
///
/// Each call to [`SearchController::next_action`] builds a fresh search tree
/// from the committed node, traverses it, selects a target, and commits only
/// the first step towards it. The stage machine moves from
/// [`Stage::Pick`] to [`Stage::Drop`] to [`Stage::Done`] as goals are met.
#[derive(Debug, Clone)]
pub struct SearchController {
    config: SearchConfig,
    stage: Stage,
    current: Option<Node>,
    steps: usize,
    rng: StdRng,
}

impl SearchController {
    /// Create a controller; the first decision roots at the environment's
    /// current state unless [`Policy::reset`] is called first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config.max_depth` is not
    /// in `1..=MAX_SEARCH_DEPTH`.
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stage: Stage::Pick,
            current: None,
            steps: 0,
            rng: build_rng(config.seed),
        })
    }

    /// Create a controller rooted at the environment's current state.
    pub fn for_env<E>(config: SearchConfig, env: &E) -> Result<Self>
    where
        E: Environment + ?Sized,
    {
        let mut controller = Self::new(config)?;
        controller.restart(env)?;
        Ok(controller)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Active stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Committed node the next search roots at.
    pub fn current(&self) -> Option<&Node> {
        self.current.as_ref()
    }

    /// Episode reward accumulated by committed steps.
    pub fn cumulative_reward(&self) -> f64 {
        self.current.as_ref().map_or(0.0, Node::cumulative_reward)
    }

    /// Steps committed since the last restart.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Re-root at the environment's current state and derive the stage from it.
    pub fn restart<E>(&mut self, env: &E) -> Result<()>
    where
        E: Environment + ?Sized,
    {
        let state = env.current_state();
        let observation = env.observation_of(state)?;
        self.current = Some(Node::root(state, observation));
        self.stage = Stage::for_state(env, state);
        self.steps = 0;
        debug!(state, stage = %self.stage, "controller restarted");
        Ok(())
    }

    /// Search the next decision without committing it.
    ///
    /// The environment is left wherever the traversal last drove it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GoalAlreadySatisfied`] once the passenger has been
    /// delivered, and [`Error::NoCandidate`] if the traversal leaves nothing
    /// to select.
    pub fn plan<E>(&mut self, env: &mut E) -> Result<SearchPlan>
    where
        E: Environment + ?Sized,
    {
        if self.current.is_none() {
            self.restart(env)?;
        }
        let current = self.current.as_ref().ok_or(Error::NoCandidate {
            max_depth: self.config.max_depth,
        })?;
        let state = current.state().ok_or(Error::NoCandidate {
            max_depth: self.config.max_depth,
        })?;
        if self.stage == Stage::Done || env.item_delivered(state) {
            return Err(Error::GoalAlreadySatisfied);
        }

        let root = current.detach().ok_or(Error::NoCandidate {
            max_depth: self.config.max_depth,
        })?;
        let mut tree = SearchTree::new(root, self.stage.actions(), self.config.max_depth)?;
        let winner = TreeTraversal::new(self.stage).run(&mut tree, env)?;

        let (selected, won) = match winner {
            Some(id) => (id, true),
            None => {
                let candidates = tree.deepest_frontier().iter().map(|&id| {
                    let score = tree.node(id).map_or(f64::NEG_INFINITY, Node::cumulative_reward);
                    (id, score)
                });
                let id = choose_max(&mut self.rng, candidates).ok_or(Error::NoCandidate {
                    max_depth: self.config.max_depth,
                })?;
                let path = tree.full_path(id)?;
                debug!(
                    candidates = tree.deepest_frontier().len(),
                    %path,
                    "no goal in reach, falling back to best deepest node"
                );
                (id, false)
            }
        };
        let step = tree.ancestor_at_depth_one(selected)?;

        Ok(SearchPlan {
            tree,
            selected,
            step,
            won,
        })
    }

    /// Commit the first step of a plan and advance the stage machine.
    pub fn commit<E>(&mut self, plan: &SearchPlan, env: &mut E) -> Result<Decision>
    where
        E: Environment + ?Sized,
    {
        let step = plan.tree.node(plan.step)?;
        let (Some(action), Some(state), Some(observation)) =
            (step.action(), step.state(), step.observation().copied())
        else {
            return Err(Error::NoCandidate {
                max_depth: self.config.max_depth,
            });
        };
        env.reset_to(state)?;

        let previous = self.cumulative_reward();
        let reward = step.reward();
        let mut committed = Node::root(state, observation);
        committed.action = Some(action);
        committed.reward = reward;
        committed.cumulative_reward = previous + reward;
        self.current = Some(committed);
        self.steps += 1;

        let next = self.stage.next(env, state);
        if next != self.stage {
            info!(from = %self.stage, to = %next, state, step = self.steps, "stage transition");
            self.stage = next;
        }

        let status = if env.item_delivered(state) {
            RunStatus::Terminated
        } else {
            RunStatus::Running
        };
        debug!(%action, reward, state, %status, "committed step");

        Ok(Decision {
            action,
            reward,
            state,
            probability: None,
            status,
        })
    }

    /// Search, commit and report the next action.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxi_driver::{
    ///     search::{SearchConfig, SearchController, Stage},
    ///     taxi::TaxiEnv,
    /// };
    ///
    /// let mut env = TaxiEnv::from_state(368).unwrap();
    /// let mut controller = SearchController::for_env(SearchConfig::new(3), &env).unwrap();
    /// let decision = controller.next_action(&mut env).unwrap();
    /// assert_eq!(controller.steps(), 1);
    /// assert_eq!(controller.stage(), Stage::Pick);
    /// assert_eq!(decision.reward, -1.0);
    /// ```
    pub fn next_action<E>(&mut self, env: &mut E) -> Result<Decision>
    where
        E: Environment + ?Sized,
    {
        let plan = self.plan(env)?;
        self.commit(&plan, env)
    }

    /// Action that produced the committed node, if any.
    pub fn last_action(&self) -> Option<Action> {
        self.current.as_ref().and_then(Node::action)
    }
}

impl Policy for SearchController {
    fn next_action(&mut self, env: &mut dyn Environment) -> Result<Decision> {
        SearchController::next_action(self, env)
    }

    fn name(&self) -> &str {
        "search"
    }

    fn reset(&mut self, env: &dyn Environment) -> Result<()> {
        self.restart(env)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
