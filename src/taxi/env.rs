//! Taxi environment implementing the [`Environment`] port

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::trace;

use super::{
    Action,
    grid::{Landmark, PassengerLocation, TaxiState, render_state},
};
use crate::{
    error::Result,
    ports::{Environment, Transition},
    types::{Observation, STATE_COUNT},
    utils::build_rng,
};

/// States an episode may start from: passenger waiting at a landmark that is
/// not its destination, taxi anywhere.
fn initial_states() -> Vec<TaxiState> {
    (0..STATE_COUNT)
        .filter_map(|index| TaxiState::decode(index).ok())
        .filter(|state| match state.passenger {
            PassengerLocation::At(landmark) => landmark != state.destination,
            PassengerLocation::InTaxi => false,
        })
        .collect()
}

const FALLBACK_START: TaxiState = TaxiState {
    row: 0,
    col: 0,
    passenger: PassengerLocation::At(Landmark::Yellow),
    destination: Landmark::Red,
};

/// Deterministic 5x5 taxi world.
///
/// Transitions never truncate; episode step limits are applied by the
/// episode pipeline.
#[derive(Debug, Clone)]
pub struct TaxiEnv {
    state: TaxiState,
    initial_state: TaxiState,
    starts: Vec<TaxiState>,
    rng: StdRng,
}

impl TaxiEnv {
    /// Create an environment and sample its first episode.
    pub fn new(seed: Option<u64>) -> Self {
        let mut env = Self {
            state: FALLBACK_START,
            initial_state: FALLBACK_START,
            starts: initial_states(),
            rng: build_rng(seed),
        };
        env.sample_start();
        env
    }

    /// Create an environment whose episode starts in a fixed state.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::StateOutOfRange`] if `state >= 500`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxi_driver::{ports::Environment, taxi::TaxiEnv};
    ///
    /// let env = TaxiEnv::from_state(368).unwrap();
    /// assert_eq!(env.current_state(), 368);
    /// assert_eq!(env.initial_state(), 368);
    /// ```
    pub fn from_state(state: usize) -> Result<Self> {
        let state = TaxiState::decode(state)?;
        Ok(Self {
            state,
            initial_state: state,
            starts: initial_states(),
            rng: build_rng(None),
        })
    }

    /// Decoded view of the current state.
    pub fn decoded(&self) -> TaxiState {
        self.state
    }

    fn sample_start(&mut self) {
        let start = self
            .starts
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(FALLBACK_START);
        self.state = start;
        self.initial_state = start;
    }
}

impl Default for TaxiEnv {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Environment for TaxiEnv {
    fn state_count(&self) -> usize {
        STATE_COUNT
    }

    fn reset(&mut self, seed: Option<u64>) -> usize {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.sample_start();
        self.state.encode()
    }

    fn reset_to(&mut self, state: usize) -> Result<()> {
        self.state = TaxiState::decode(state)?;
        Ok(())
    }

    fn step(&mut self, action: Action) -> Transition {
        let (next, reward, delivered) = self.state.apply(action);
        let next_index = next.encode();
        trace!(from = self.state.encode(), to = next_index, %action, reward, "taxi step");
        self.state = next;

        Transition {
            state: next_index,
            reward,
            terminated: delivered,
            truncated: false,
            observation: Observation::deterministic(next.action_mask()),
        }
    }

    fn current_state(&self) -> usize {
        self.state.encode()
    }

    fn initial_state(&self) -> usize {
        self.initial_state.encode()
    }

    fn initial_observation(&self) -> Observation {
        Observation::deterministic(self.initial_state.action_mask())
    }

    fn observation_of(&self, state: usize) -> Result<Observation> {
        let decoded = TaxiState::decode(state)?;
        Ok(Observation::deterministic(decoded.action_mask()))
    }

    fn item_aboard(&self, state: usize) -> bool {
        TaxiState::decode(state).is_ok_and(|s| s.passenger_in_taxi())
    }

    fn item_delivered(&self, state: usize) -> bool {
        TaxiState::decode(state).is_ok_and(|s| s.passenger_delivered())
    }

    fn render(&self) -> String {
        render_state(&self.state)
    }
}
