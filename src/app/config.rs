//! Configuration types for policy creation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::QLearningConfig, search::SearchConfig};

/// Kind of policy to drive the taxi with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PolicyKind {
    /// Uniform over all six actions
    Random,
    /// Uniform over the legal actions
    Legal,
    /// Goal-directed tree search
    #[default]
    Search,
    /// Tabular ε-greedy Q-learning
    QLearning,
    /// Tabular ε-greedy SARSA
    Sarsa,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Random,
        PolicyKind::Legal,
        PolicyKind::Search,
        PolicyKind::QLearning,
        PolicyKind::Sarsa,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::Legal => "legal",
            PolicyKind::Search => "search",
            PolicyKind::QLearning => "q-learning",
            PolicyKind::Sarsa => "sarsa",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| Error::InvalidConfiguration {
                message: format!(
                    "unknown policy '{s}'. Supported: random, legal, search, q-learning, sarsa"
                ),
            })
    }
}

/// Configuration for creating a policy.
///
/// # Examples
///
/// ```
/// use taxi_driver::app::{PolicyConfig, PolicyKind};
///
/// let config = PolicyConfig::new(PolicyKind::Search)
///     .with_depth(4)
///     .with_seed(42);
/// assert_eq!(config.search.max_depth, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
    /// Tree search settings, used by [`PolicyKind::Search`]
    pub search: SearchConfig,
    /// Learner settings, used by [`PolicyKind::QLearning`] and [`PolicyKind::Sarsa`]
    pub q_learning: QLearningConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl PolicyConfig {
    /// Create a policy configuration with default search and learner settings.
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            kind,
            search: SearchConfig::default(),
            q_learning: QLearningConfig::default(),
            seed: None,
        }
    }

    /// Set the search depth.
    pub fn with_depth(mut self, max_depth: usize) -> Self {
        self.search.max_depth = max_depth;
        self
    }

    pub fn with_q_learning(mut self, config: QLearningConfig) -> Self {
        self.q_learning = config;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new(PolicyKind::default())
    }
}
