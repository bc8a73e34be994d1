//! Per-episode and aggregated run metrics

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::ports::RunStatus;

/// Outcome of one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeMetrics {
    /// Episode index (0-based)
    pub episode: usize,
    /// State the episode started from
    pub initial_state: usize,
    /// Committed steps
    pub steps: usize,
    /// Sum of the immediate rewards
    pub cumulative_reward: f64,
    /// Terminated when the passenger was delivered, Truncated otherwise
    pub status: RunStatus,
}

impl EpisodeMetrics {
    pub fn delivered(&self) -> bool {
        self.status == RunStatus::Terminated
    }
}

/// Summary statistics of a series (population standard deviation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub mean: f64,
    pub std: f64,
    pub max: f64,
    pub min: f64,
}

impl AggregatedMetrics {
    /// Aggregate a series; an empty series aggregates to zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxi_driver::pipeline::AggregatedMetrics;
    ///
    /// let metrics = AggregatedMetrics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    /// assert_eq!(metrics.mean, 5.0);
    /// assert_eq!(metrics.std, 2.0);
    /// assert_eq!((metrics.min, metrics.max), (2.0, 9.0));
    /// ```
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                mean: 0.0,
                std: 0.0,
                max: 0.0,
                min: 0.0,
            };
        }
        Self {
            mean: Statistics::mean(values),
            std: Statistics::population_std_dev(values),
            max: Statistics::max(values),
            min: Statistics::min(values),
        }
    }

    /// Aggregate the cumulative rewards of a set of episodes.
    pub fn from_rewards(episodes: &[EpisodeMetrics]) -> Self {
        let rewards: Vec<f64> = episodes.iter().map(|m| m.cumulative_reward).collect();
        Self::from_values(&rewards)
    }

    /// Aggregate the episode lengths of a set of episodes.
    pub fn from_steps(episodes: &[EpisodeMetrics]) -> Self {
        let steps: Vec<f64> = episodes.iter().map(|m| m.steps as f64).collect();
        Self::from_values(&steps)
    }
}

/// Fraction of episodes that delivered the passenger.
pub fn success_rate(episodes: &[EpisodeMetrics]) -> f64 {
    if episodes.is_empty() {
        return 0.0;
    }
    let delivered = episodes.iter().filter(|m| m.delivered()).count();
    delivered as f64 / episodes.len() as f64
}
