//! Tabular Q-learning and SARSA baselines
//!
//! An ε-greedy agent that learns online from every step it commits, using
//! either the off-policy update
//!
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//!
//! or the on-policy SARSA update, which bootstraps from the next action it
//! actually takes.
//!
//! Exploration decays multiplicatively between episodes.
//!
//! ```no_run
//! use taxi_driver::q_learning::{QLearningConfig, QLearningPolicy};
//!
//! let policy = QLearningPolicy::new(
//!     QLearningConfig::default()
//!         .with_learning_rate(0.1)
//!         .with_seed(42),
//! );
//! ```

pub mod agent;
pub mod q_table;

pub use agent::{QLearningConfig, QLearningPolicy, UpdateRule};
pub use q_table::QTable;
