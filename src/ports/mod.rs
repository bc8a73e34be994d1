//! Ports (trait boundaries) between the search core and its collaborators.
//!
//! The environment is the world being driven, policies choose actions, and
//! observers watch episode runs. The taxi world and the pipeline observers are
//! the adapters shipped with the crate.

pub mod environment;
pub mod observer;
pub mod policy;

pub use environment::{Environment, Transition};
pub use observer::Observer;
pub use policy::{Decision, Policy, RunStatus};
