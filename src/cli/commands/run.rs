//! Run command - Drive a policy over a batch of episodes

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, PolicyConfig, PolicyKind},
    cli::output::{print_kv, print_run_report},
    pipeline::{
        DEFAULT_MAX_STEPS, EpisodeConfig, EpisodeRunner, MetricsObserver, ProgressObserver,
    },
    q_learning::QLearningConfig,
    search::DEFAULT_SEARCH_DEPTH,
};

#[derive(Parser, Debug)]
#[command(about = "Run a policy over a number of episodes")]
pub struct RunArgs {
    /// Policy to drive the taxi with (random, legal, search, q-learning, sarsa)
    #[arg(long, short = 'p', default_value = "search")]
    pub policy: String,

    /// Number of episodes
    #[arg(long, short = 'e', default_value_t = 10)]
    pub episodes: usize,

    /// Search depth of every decision (search policy only)
    #[arg(long, short = 'd', default_value_t = DEFAULT_SEARCH_DEPTH)]
    pub depth: usize,

    /// Steps after which an episode is truncated
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate (q-learning and sarsa policies only)
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor (q-learning and sarsa policies only)
    #[arg(long, default_value_t = 0.99)]
    pub discount: f64,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Export the run report to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let kind: PolicyKind = args.policy.parse()?;

    let mut policy_config = PolicyConfig::new(kind)
        .with_depth(args.depth)
        .with_q_learning(
            QLearningConfig::default()
                .with_learning_rate(args.learning_rate)
                .with_discount_factor(args.discount),
        );
    let mut episode_config = EpisodeConfig::new(args.episodes).with_max_steps(args.max_steps);
    if let Some(seed) = args.seed {
        policy_config = policy_config.with_seed(seed);
        episode_config = episode_config.with_seed(seed);
    }

    let app = App::new();
    let mut env = app.create_environment(args.seed);
    let mut policy = app
        .create_policy(policy_config)
        .with_context(|| format!("failed to create the {kind} policy"))?;

    let mut runner = EpisodeRunner::new(episode_config)?;
    if !args.no_progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    runner = runner.with_observer(Box::new(MetricsObserver::new()));

    let report = runner.run(policy.as_mut(), &mut env)?;
    print_run_report(&report);

    if let Some(path) = &args.export {
        report
            .save(path)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        print_kv("Report", &path.display().to_string());
    }

    Ok(())
}
