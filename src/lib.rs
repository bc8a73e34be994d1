//! Goal-directed tree search for the taxi pickup/drop-off task
//!
//! This crate provides:
//! - A deterministic 5x5 taxi world behind an [`ports::Environment`] port
//! - A fixed-depth, breadth-first search tree with legality pruning
//! - A stage-driven controller committing one searched step at a time
//! - Sampling and Q-learning baselines behind the same [`ports::Policy`] port
//! - An episode pipeline with observers and aggregated metrics

pub mod app;
pub mod cli;
pub mod error;
pub mod identifiers;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod search;
pub mod taxi;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use identifiers::NodeId;
pub use ports::{Decision, Environment, Policy, RunStatus};
pub use search::{Node, SearchConfig, SearchController, SearchTree, Stage, TreeTraversal};
pub use taxi::{Action, ActionCatalog, TaxiEnv};
pub use types::{ActionMask, Observation};
