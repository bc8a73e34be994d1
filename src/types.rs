//! Newtype wrappers for legality masks and visit-time observations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::taxi::Action;

/// Number of actions in the catalog.
pub const ACTION_COUNT: usize = 6;

/// Number of states in the taxi world.
pub const STATE_COUNT: usize = 500;

/// Per-state legality vector aligned 1:1 with [`Action::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMask([bool; ACTION_COUNT]);

impl ActionMask {
    /// Create a mask from explicit flags, in catalog order.
    pub const fn new(flags: [bool; ACTION_COUNT]) -> Self {
        ActionMask(flags)
    }

    /// Create a mask from 0/1 flags, the way gym-style environments report it.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxi_driver::{taxi::Action, types::ActionMask};
    ///
    /// let mask = ActionMask::from_bits([0, 1, 1, 0, 1, 0]);
    /// assert_eq!(mask.legal_actions(), vec![Action::North, Action::East, Action::PickUp]);
    /// ```
    pub fn from_bits(bits: [u8; ACTION_COUNT]) -> Self {
        ActionMask(bits.map(|bit| bit != 0))
    }

    /// Mask with every action legal.
    pub const fn all() -> Self {
        ActionMask([true; ACTION_COUNT])
    }

    /// Mask with no action legal.
    pub const fn none() -> Self {
        ActionMask([false; ACTION_COUNT])
    }

    pub fn is_legal(&self, action: Action) -> bool {
        self.0[action.index()]
    }

    /// Legal actions in catalog order.
    pub fn legal_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.is_legal(action))
            .collect()
    }

    /// Positional filter of an action subset against this mask.
    pub fn filter(&self, subset: &[Action]) -> Vec<Action> {
        subset
            .iter()
            .copied()
            .filter(|&action| self.is_legal(action))
            .collect()
    }

    /// Number of legal actions.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&legal| legal).count()
    }

    /// Mask as 0/1 flags.
    pub fn to_bits(&self) -> [u8; ACTION_COUNT] {
        self.0.map(u8::from)
    }
}

impl fmt::Display for ActionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.to_bits();
        write!(
            f,
            "[{} {} {} {} {} {}]",
            bits[0], bits[1], bits[2], bits[3], bits[4], bits[5]
        )
    }
}

/// What the environment reports about a state when it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Which catalog actions are legal from the state
    pub action_mask: ActionMask,
    /// Probability of the transition that produced the state
    pub prob: f64,
}

impl Observation {
    pub fn new(action_mask: ActionMask, prob: f64) -> Self {
        Self { action_mask, prob }
    }

    /// Observation of a deterministic transition.
    pub fn deterministic(action_mask: ActionMask) -> Self {
        Self::new(action_mask, 1.0)
    }
}
