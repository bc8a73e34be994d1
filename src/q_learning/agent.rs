//! Tabular TD-control policy: off-policy Q-learning or on-policy SARSA

use rand::{Rng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    error::{Error, Result},
    ports::{Decision, Environment, Policy, RunStatus},
    q_learning::q_table::QTable,
    taxi::Action,
    utils::build_rng,
};

/// Temporal-difference target used by a [`QLearningPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UpdateRule {
    /// Bootstrap from the best next action
    #[default]
    QLearning,
    /// Bootstrap from the next action actually taken
    Sarsa,
}

/// Hyper-parameters of a [`QLearningPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// α parameter (0.0 to 1.0)
    pub learning_rate: f64,
    /// γ parameter (0.0 to 1.0)
    pub discount_factor: f64,
    /// Initial exploration rate
    pub epsilon: f64,
    /// Multiplicative decay per episode
    pub epsilon_decay: f64,
    /// Exploration floor
    pub min_epsilon: f64,
    /// Initial Q-value for unseen pairs
    pub q_init: f64,
    pub update_rule: UpdateRule,
    pub seed: Option<u64>,
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    /// Set the initial exploration rate, its per-episode decay and its floor.
    pub fn with_exploration(mut self, epsilon: f64, decay: f64, min_epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self.epsilon_decay = decay;
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_update_rule(mut self, update_rule: UpdateRule) -> Self {
        self.update_rule = update_rule;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if a rate lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
            ("epsilon", self.epsilon),
            ("epsilon decay", self.epsilon_decay),
            ("min epsilon", self.min_epsilon),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.99,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            min_epsilon: 0.01,
            q_init: 0.0,
            update_rule: UpdateRule::QLearning,
            seed: None,
        }
    }
}

/// ε-greedy tabular learner over the full action catalog.
///
/// Learns from every committed step; calling [`Policy::reset`] between
/// episodes decays the exploration rate but keeps the table. Under
/// [`UpdateRule::Sarsa`] the action bootstrapped from is the one taken next.
#[derive(Debug, Clone)]
pub struct QLearningPolicy {
    config: QLearningConfig,
    q_table: QTable,
    epsilon: f64,
    episodes: usize,
    /// SARSA's already chosen action for the state it was chosen in
    pending: Option<(usize, Action)>,
    rng: StdRng,
}

impl QLearningPolicy {
    pub fn new(config: QLearningConfig) -> Self {
        Self {
            config,
            q_table: QTable::new(config.learning_rate, config.discount_factor, config.q_init),
            epsilon: config.epsilon,
            episodes: 0,
            pending: None,
            rng: build_rng(config.seed),
        }
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Forget everything learned and restore the initial exploration rate.
    pub fn clear(&mut self) {
        self.q_table.reset();
        self.epsilon = self.config.epsilon;
        self.episodes = 0;
        self.pending = None;
        self.rng = build_rng(self.config.seed);
    }

    fn select_action(&mut self, state: usize) -> Result<Action> {
        let candidates = if self.rng.random::<f64>() < self.epsilon {
            Action::ALL.to_vec()
        } else {
            self.q_table.greedy_actions(state, &Action::ALL)
        };
        candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalActions { state })
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }
}

impl Policy for QLearningPolicy {
    fn next_action(&mut self, env: &mut dyn Environment) -> Result<Decision> {
        let state = env.current_state();
        if env.item_delivered(state) {
            return Err(Error::GoalAlreadySatisfied);
        }

        let action = match self.pending.take() {
            Some((pending_state, action)) if pending_state == state => action,
            _ => self.select_action(state)?,
        };
        let transition = env.step(action);
        match self.config.update_rule {
            UpdateRule::QLearning => self.q_table.q_learning_update(
                state,
                action,
                transition.reward,
                transition.state,
                &Action::ALL,
                transition.terminated,
            ),
            UpdateRule::Sarsa => {
                let next_action = if transition.terminated {
                    action
                } else {
                    let next_action = self.select_action(transition.state)?;
                    self.pending = Some((transition.state, next_action));
                    next_action
                };
                self.q_table.sarsa_update(
                    state,
                    action,
                    transition.reward,
                    transition.state,
                    next_action,
                    transition.terminated,
                );
            }
        }
        trace!(
            state,
            %action,
            reward = transition.reward,
            q = self.q_table.get(state, action),
            rule = ?self.config.update_rule,
            "td update"
        );

        Ok(Decision {
            action,
            reward: transition.reward,
            state: transition.state,
            probability: None,
            status: if transition.terminated {
                RunStatus::Terminated
            } else {
                RunStatus::Running
            },
        })
    }

    fn name(&self) -> &str {
        match self.config.update_rule {
            UpdateRule::QLearning => "Q-Learning",
            UpdateRule::Sarsa => "SARSA",
        }
    }

    fn reset(&mut self, _env: &dyn Environment) -> Result<()> {
        self.pending = None;
        if self.episodes > 0 {
            self.decay_epsilon();
        }
        self.episodes += 1;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
