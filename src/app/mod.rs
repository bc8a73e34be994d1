//! Application layer with dependency injection container.
//!
//! The container creates the taxi environment and any of the policies from a
//! [`PolicyConfig`], applying a default seed when the configuration carries
//! none.
//!
//! # Usage
//!
//! ```
//! use taxi_driver::app::{App, PolicyConfig, PolicyKind};
//! use taxi_driver::pipeline::{EpisodeConfig, EpisodeRunner};
//!
//! let app = App::for_testing().with_default_seed(42).build();
//! let mut env = app.create_environment(None);
//! let mut policy = app.create_policy(PolicyConfig::new(PolicyKind::Legal))?;
//! let mut runner = EpisodeRunner::new(EpisodeConfig::new(2).with_max_steps(20))?;
//! let report = runner.run(policy.as_mut(), &mut env)?;
//! assert_eq!(report.episodes.len(), 2);
//! # Ok::<(), taxi_driver::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{PolicyConfig, PolicyKind};
pub use container::{App, AppBuilder};
