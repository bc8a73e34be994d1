//! Observer port - abstraction for episode observation and data collection
//!
//! Observers are composed by the episode pipeline so that progress display and
//! metrics collection stay decoupled from the loop that drives the policy.

use super::Decision;
use crate::{Result, pipeline::EpisodeMetrics};

/// Observer trait for monitoring episode runs
///
/// # Event Sequence
///
/// 1. `on_run_start(total_episodes)` - once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode, initial_state)`
///    - `on_step(episode, step, decision)` for each committed step
///    - `on_episode_end(episode, metrics)`
/// 3. `on_run_end()` - once at the end
///
/// # Examples
///
/// ```no_run
/// use taxi_driver::{pipeline::EpisodeMetrics, ports::Observer};
///
/// struct DeliveryCounter {
///     delivered: usize,
/// }
///
/// impl Observer for DeliveryCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         metrics: &EpisodeMetrics,
///     ) -> taxi_driver::Result<()> {
///         if metrics.delivered() {
///             self.delivered += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    fn on_run_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_start(&mut self, _episode: usize, _initial_state: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every committed step, with the step index within the
    /// episode (0-based).
    fn on_step(&mut self, _episode: usize, _step: usize, _decision: &Decision) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _metrics: &EpisodeMetrics) -> Result<()> {
        Ok(())
    }

    /// Called when the run completes. Use this to finish progress displays.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
