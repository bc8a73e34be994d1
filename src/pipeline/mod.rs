//! Episode pipeline abstractions
//!
//! This module provides:
//! - An episode runner driving any [`Policy`] against an [`Environment`]
//! - Sampling baselines to compare the search against
//! - Observers for progress display and metrics collection
//! - Per-episode and aggregated metrics, exportable as a JSON report

pub mod baselines;
pub mod episode;
pub mod metrics;
pub mod observers;

pub use baselines::{LegalSamplePolicy, RandomSamplePolicy};
pub use episode::{DEFAULT_MAX_STEPS, EpisodeConfig, EpisodeRunner, RunReport};
pub use metrics::{AggregatedMetrics, EpisodeMetrics, success_rate};
pub use observers::{MetricsObserver, ProgressObserver};

pub use crate::ports::{Environment, Observer, Policy};
