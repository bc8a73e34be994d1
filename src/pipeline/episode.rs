//! Episode runner driving a policy against an environment

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::metrics::{AggregatedMetrics, EpisodeMetrics, success_rate};
use crate::{
    Error, Result,
    ports::{Environment, Observer, Policy, RunStatus},
};

/// Episode length limit applied when none is configured.
pub const DEFAULT_MAX_STEPS: usize = 200;

/// Episode run configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Number of episodes
    pub episodes: usize,

    /// Steps after which an episode is truncated
    pub max_steps: usize,

    /// Base seed; episode `i` resets the environment with `seed + i`
    pub seed: Option<u64>,
}

impl EpisodeConfig {
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            ..Self::default()
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `episodes` or `max_steps` is
    /// zero.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(Error::InvalidConfiguration {
                message: "at least one episode is required".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    fn episode_seed(&self, episode: usize) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(episode as u64))
    }
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            episodes: 1,
            max_steps: DEFAULT_MAX_STEPS,
            seed: None,
        }
    }
}

/// Result of an episode run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Policy that was run
    pub policy: String,

    pub config: EpisodeConfig,

    /// Cumulative reward statistics
    pub rewards: AggregatedMetrics,

    /// Episode length statistics
    pub steps: AggregatedMetrics,

    /// Fraction of episodes ending in a delivery
    pub success_rate: f64,

    pub episodes: Vec<EpisodeMetrics>,
}

impl RunReport {
    pub fn new(policy: impl Into<String>, config: EpisodeConfig, episodes: Vec<EpisodeMetrics>) -> Self {
        Self {
            policy: policy.into(),
            config,
            rewards: AggregatedMetrics::from_rewards(&episodes),
            steps: AggregatedMetrics::from_steps(&episodes),
            success_rate: success_rate(&episodes),
            episodes,
        }
    }

    /// Save report to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}

/// Runs episodes of one policy, notifying observers along the way
pub struct EpisodeRunner {
    config: EpisodeConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EpisodeRunner {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid configuration.
    pub fn new(config: EpisodeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observers: Vec::new(),
        })
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    /// Run every configured episode.
    pub fn run(&mut self, policy: &mut dyn Policy, env: &mut dyn Environment) -> Result<RunReport> {
        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let mut episodes = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let metrics = self.run_episode(episode, policy, env)?;
            episodes.push(metrics);
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let report = RunReport::new(policy.name(), self.config, episodes);
        info!(
            policy = %report.policy,
            episodes = report.episodes.len(),
            mean_reward = report.rewards.mean,
            success_rate = report.success_rate,
            "run finished"
        );
        Ok(report)
    }

    /// Run a single episode from a fresh environment reset.
    pub fn run_episode(
        &mut self,
        episode: usize,
        policy: &mut dyn Policy,
        env: &mut dyn Environment,
    ) -> Result<EpisodeMetrics> {
        let initial_state = env.reset(self.config.episode_seed(episode));
        policy.reset(env)?;
        for observer in &mut self.observers {
            observer.on_episode_start(episode, initial_state)?;
        }

        let mut steps = 0;
        let mut cumulative_reward = 0.0;
        let mut status = RunStatus::Running;
        while status == RunStatus::Running {
            let decision = policy.next_action(env)?;
            cumulative_reward += decision.reward;
            for observer in &mut self.observers {
                observer.on_step(episode, steps, &decision)?;
            }
            steps += 1;
            status = decision.status;
            if status == RunStatus::Running && steps >= self.config.max_steps {
                status = RunStatus::Truncated;
                warn!(episode, steps, policy = policy.name(), "episode truncated");
            }
        }

        let metrics = EpisodeMetrics {
            episode,
            initial_state,
            steps,
            cumulative_reward,
            status,
        };
        debug!(episode, steps, cumulative_reward, %status, "episode finished");
        for observer in &mut self.observers {
            observer.on_episode_end(episode, &metrics)?;
        }
        Ok(metrics)
    }
}
