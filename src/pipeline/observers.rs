//! Observer implementations for episode runs

use indicatif::{ProgressBar, ProgressStyle};

use super::metrics::{AggregatedMetrics, EpisodeMetrics, success_rate};
use crate::{
    Result,
    ports::{Decision, Observer},
};

/// Progress bar observer - displays run progress with deliveries so far
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    delivered: usize,
    truncated: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            delivered: 0,
            truncated: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} truncated:{}", self.delivered, self.truncated)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (delivered:{msg})",
                )
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, metrics: &EpisodeMetrics) -> Result<()> {
        if metrics.delivered() {
            self.delivered += 1;
        } else {
            self.truncated += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - collects per-episode metrics and step-level counters
#[derive(Debug, Default)]
pub struct MetricsObserver {
    episodes: Vec<EpisodeMetrics>,
    illegal_engagements: usize,
    total_steps: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> &[EpisodeMetrics] {
        &self.episodes
    }

    /// Aggregated cumulative rewards of the observed episodes.
    pub fn rewards(&self) -> AggregatedMetrics {
        AggregatedMetrics::from_rewards(&self.episodes)
    }

    pub fn success_rate(&self) -> f64 {
        success_rate(&self.episodes)
    }

    /// Pick-ups or drop-offs attempted where they were not allowed.
    pub fn illegal_engagements(&self) -> usize {
        self.illegal_engagements
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }
}

impl Observer for MetricsObserver {
    fn on_run_start(&mut self, total_episodes: usize) -> Result<()> {
        self.episodes = Vec::with_capacity(total_episodes);
        self.illegal_engagements = 0;
        self.total_steps = 0;
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step: usize, decision: &Decision) -> Result<()> {
        self.total_steps += 1;
        if !decision.action.is_move()
            && decision.reward <= crate::taxi::grid::ILLEGAL_ENGAGEMENT_REWARD
        {
            self.illegal_engagements += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, metrics: &EpisodeMetrics) -> Result<()> {
        self.episodes.push(metrics.clone());
        Ok(())
    }
}
