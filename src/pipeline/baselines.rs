//! Sampling baselines to compare the search against

use rand::{rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::{Decision, Environment, Policy, RunStatus, Transition},
    taxi::Action,
    utils::build_rng,
};

fn ensure_not_delivered(env: &dyn Environment) -> Result<()> {
    if env.item_delivered(env.current_state()) {
        return Err(Error::GoalAlreadySatisfied);
    }
    Ok(())
}

fn decision(action: Action, transition: Transition, probability: f64) -> Decision {
    Decision {
        action,
        reward: transition.reward,
        state: transition.state,
        probability: Some(probability),
        status: if transition.terminated {
            RunStatus::Terminated
        } else {
            RunStatus::Running
        },
    }
}

/// Uniform choice over the full catalog, legal or not.
pub struct RandomSamplePolicy {
    name: String,
    rng: StdRng,
}

impl RandomSamplePolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(None),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(Some(seed)),
        }
    }
}

impl Policy for RandomSamplePolicy {
    fn next_action(&mut self, env: &mut dyn Environment) -> Result<Decision> {
        ensure_not_delivered(env)?;
        let action = Action::ALL
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoLegalActions {
                state: env.current_state(),
            })?;
        let transition = env.step(action);
        Ok(decision(action, transition, 1.0 / Action::ALL.len() as f64))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Uniform choice over the actions legal in the current state.
///
/// Never drives into a wall nor attempts a pick-up or drop-off that the
/// environment would penalize.
pub struct LegalSamplePolicy {
    name: String,
    rng: StdRng,
}

impl LegalSamplePolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(None),
        }
    }

    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: build_rng(Some(seed)),
        }
    }

    /// Probability of every legal action in the current state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] if the state allows no action.
    pub fn actions_probability(&self, env: &dyn Environment) -> Result<Vec<(Action, f64)>> {
        let state = env.current_state();
        let legal = env.observation_of(state)?.action_mask.legal_actions();
        if legal.is_empty() {
            return Err(Error::NoLegalActions { state });
        }
        let probability = 1.0 / legal.len() as f64;
        Ok(legal
            .into_iter()
            .map(|action| (action, probability))
            .collect())
    }
}

impl Policy for LegalSamplePolicy {
    fn next_action(&mut self, env: &mut dyn Environment) -> Result<Decision> {
        ensure_not_delivered(env)?;
        let candidates = self.actions_probability(env)?;
        let (action, probability) =
            candidates
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoLegalActions {
                    state: env.current_state(),
                })?;
        let transition = env.step(action);
        Ok(decision(action, transition, probability))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
