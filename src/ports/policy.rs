//! Policy port - abstraction over everything that picks the next action
//!
//! Implementations include:
//! - The goal-directed tree search ([`crate::search::SearchController`])
//! - Uniform baselines over all or only legal actions
//! - Tabular Q-learning

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Environment;
use crate::{Result, taxi::Action};

/// Lifecycle status of an episode after a committed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    /// Episode continues
    Running,
    /// Goal reached; no further actions may be requested
    Terminated,
    /// Episode cut short by a step limit
    Truncated,
}

impl RunStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, RunStatus::Running)
    }

    pub fn name(self) -> &'static str {
        match self {
            RunStatus::Running => "RUNNING",
            RunStatus::Terminated => "TERMINATED",
            RunStatus::Truncated => "TRUNCATED",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A committed step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Action committed to
    pub action: Action,
    /// Immediate reward of the action
    pub reward: f64,
    /// State the environment was left in
    pub state: usize,
    /// Probability with which the action was chosen, for stochastic policies
    pub probability: Option<f64>,
    pub status: RunStatus,
}

/// Policy trait - unified interface for all action selection strategies
///
/// A call to [`Policy::next_action`] commits exactly one step: when it
/// returns, the environment is in [`Decision::state`].
///
/// # Examples
///
/// ```no_run
/// use taxi_driver::ports::{Environment, Policy};
///
/// fn drive<P: Policy + ?Sized>(policy: &mut P, env: &mut dyn Environment) -> taxi_driver::Result<f64> {
///     let mut total = 0.0;
///     loop {
///         let decision = policy.next_action(env)?;
///         total += decision.reward;
///         if decision.status.is_finished() {
///             return Ok(total);
///         }
///     }
/// }
/// ```
pub trait Policy: Send {
    /// Choose, commit and report the next action.
    ///
    /// # Errors
    ///
    /// Implementations fail with [`crate::Error::GoalAlreadySatisfied`] when
    /// asked to act after the goal was reached, and propagate environment
    /// failures.
    fn next_action(&mut self, env: &mut dyn Environment) -> Result<Decision>;

    /// Policy name, used in reports and logs.
    fn name(&self) -> &str;

    /// Prepare for a new episode whose initial state is the environment's
    /// current state.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for stateless policies.
    fn reset(&mut self, _env: &dyn Environment) -> Result<()> {
        Ok(())
    }

    /// Enable downcasting to concrete types.
    fn as_any(&self) -> &dyn std::any::Any;
}
