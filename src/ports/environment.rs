//! Environment port - the simulated world the policies and the search drive

use serde::{Deserialize, Serialize};

use crate::{Result, taxi::Action, types::Observation};

/// Outcome of a single environment step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State index reached by the step
    pub state: usize,
    /// Immediate reward
    pub reward: f64,
    /// Whether the episode reached its goal
    pub terminated: bool,
    /// Whether the environment cut the episode short
    pub truncated: bool,
    /// Legality mask and auxiliary info of the reached state
    pub observation: Observation,
}

/// Environment trait - a finite, resettable world with a six-action catalog.
///
/// A single instance is shared by everything that drives it: only one
/// trajectory is live at any instant. Callers that explore alternatives must
/// force the world back with [`Environment::reset_to`] before every step.
pub trait Environment: Send {
    /// Number of states; valid state indices are `0..state_count()`.
    fn state_count(&self) -> usize;

    /// Start a new episode and return its initial state.
    ///
    /// Passing a seed makes the sampled initial state reproducible.
    fn reset(&mut self, seed: Option<u64>) -> usize;

    /// Force the world into an exact prior state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StateOutOfRange`] if the state is outside `[0, N)`.
    fn reset_to(&mut self, state: usize) -> Result<()>;

    /// Advance one tick from the current state.
    fn step(&mut self, action: Action) -> Transition;

    fn current_state(&self) -> usize;

    /// State the current episode started from.
    fn initial_state(&self) -> usize;

    /// Observation of the episode's initial state.
    fn initial_observation(&self) -> Observation;

    /// Observation of an arbitrary state, as if it had just been reached.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StateOutOfRange`] if the state is outside `[0, N)`.
    fn observation_of(&self, state: usize) -> Result<Observation>;

    /// Whether the transported item is aboard the agent in `state`.
    fn item_aboard(&self, state: usize) -> bool;

    /// Whether the transported item has reached its destination in `state`.
    fn item_delivered(&self, state: usize) -> bool;

    /// Human readable rendering of the current state.
    fn render(&self) -> String {
        format!("state {}", self.current_state())
    }
}
