//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::taxi::Action;

/// Q-table mapping (state, action) pairs to Q-values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QTable {
    /// Q-values: (state index, action index) -> Q-value
    q_values: HashMap<(usize, usize), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
    /// Initial Q-value for unseen state-action pairs
    q_init: f64,
}

impl QTable {
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
            q_init,
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: usize, action: Action) -> f64 {
        *self
            .q_values
            .get(&(state, action.index()))
            .unwrap_or(&self.q_init)
    }

    pub fn set(&mut self, state: usize, action: Action, value: f64) {
        self.q_values.insert((state, action.index()), value);
    }

    /// Get maximum Q-value over the given actions in a state
    pub fn max_q(&self, state: usize, actions: &[Action]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Actions sharing the highest Q-value, in catalog order
    pub fn greedy_actions(&self, state: usize, actions: &[Action]) -> Vec<Action> {
        crate::utils::max_ties(actions.iter().map(|&action| (action, self.get(state, action))))
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        next_actions: &[Action],
        done: bool,
    ) {
        let current_q = self.get(state, action);
        let max_next_q = if done || next_actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, next_actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        self.set(state, action, current_q + self.learning_rate * td_error);
    }

    /// SARSA update: on-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ Q(s',a') - Q(s,a)]
    pub fn sarsa_update(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_state: usize,
        next_action: Action,
        done: bool,
    ) {
        let current_q = self.get(state, action);
        let next_q = if done {
            0.0
        } else {
            self.get(next_state, next_action)
        };
        let td_error = reward + self.discount_factor * next_q - current_q;
        self.set(state, action, current_q + self.learning_rate * td_error);
    }

    /// Reset all Q-values
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(0.5, 0.99, 0.0);
        assert_eq!(qtable.get(368, Action::South), 0.0);
        assert_eq!(qtable.size(), 0);
    }

    #[test]
    fn test_greedy_actions() {
        let mut qtable = QTable::new(0.5, 0.99, 0.0);
        qtable.set(368, Action::South, 0.5);
        qtable.set(368, Action::North, 1.5);
        qtable.set(368, Action::East, 1.5);

        assert_eq!(qtable.max_q(368, &Action::ALL), 1.5);
        assert_eq!(
            qtable.greedy_actions(368, &Action::ALL),
            vec![Action::North, Action::East]
        );
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(0.5, 0.99, 0.0);
        qtable.set(468, Action::North, 1.0);
        qtable.set(468, Action::East, 2.0);

        qtable.q_learning_update(368, Action::South, -1.0, 468, &Action::ALL, false);

        // Q(s,a) = 0.0 + 0.5 * (-1.0 + 0.99 * 2.0 - 0.0) = 0.49
        assert!((qtable.get(368, Action::South) - 0.49).abs() < 1e-9);
    }

    #[test]
    fn test_terminal_update_ignores_next_state() {
        let mut qtable = QTable::new(1.0, 0.99, 0.0);
        qtable.set(85, Action::North, 100.0);
        qtable.q_learning_update(81, Action::DropOff, 20.0, 85, &Action::ALL, true);
        assert_eq!(qtable.get(81, Action::DropOff), 20.0);
    }

    #[test]
    fn test_sarsa_uses_the_chosen_next_action() {
        let mut qtable = QTable::new(0.5, 1.0, 0.0);
        qtable.set(468, Action::North, 4.0);
        qtable.set(468, Action::East, -2.0);

        qtable.sarsa_update(368, Action::South, -1.0, 468, Action::East, false);
        // 0 + 0.5 * (-1 + (-2) - 0)
        assert_eq!(qtable.get(368, Action::South), -1.5);

        qtable.q_learning_update(368, Action::North, -1.0, 468, &Action::ALL, false);
        // 0 + 0.5 * (-1 + 4 - 0)
        assert_eq!(qtable.get(368, Action::North), 1.5);

        qtable.sarsa_update(368, Action::East, 20.0, 468, Action::North, true);
        assert_eq!(qtable.get(368, Action::East), 10.0);
    }
}
