//! Dependency container wiring environments and policies together.

use super::config::{PolicyConfig, PolicyKind};
use crate::{
    Result,
    pipeline::{LegalSamplePolicy, RandomSamplePolicy},
    ports::Policy,
    q_learning::{QLearningPolicy, UpdateRule},
    search::SearchController,
    taxi::TaxiEnv,
};

/// Application with dependency injection.
///
/// Centralizes creation of the environment and the policies so that the CLI
/// and the tests share the same seeding rules.
///
/// # Examples
///
/// ```
/// use taxi_driver::app::{App, PolicyConfig, PolicyKind};
///
/// let app = App::new();
/// let policy = app.create_policy(PolicyConfig::new(PolicyKind::Search).with_depth(3))?;
/// assert_eq!(policy.name(), "search");
/// # Ok::<(), taxi_driver::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Create a builder for constructing an app with custom defaults.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn default_seed(&self) -> Option<u64> {
        self.default_seed
    }

    /// Create a taxi environment, seeded from `seed` or the app default.
    pub fn create_environment(&self, seed: Option<u64>) -> TaxiEnv {
        TaxiEnv::new(seed.or(self.default_seed))
    }

    /// Create a policy with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the search or learner
    /// settings are invalid.
    pub fn create_policy(&self, config: PolicyConfig) -> Result<Box<dyn Policy>> {
        let seed = config.seed.or(self.default_seed);
        let policy: Box<dyn Policy> = match config.kind {
            PolicyKind::Random => Box::new(match seed {
                Some(seed) => RandomSamplePolicy::with_seed("random", seed),
                None => RandomSamplePolicy::new("random"),
            }),
            PolicyKind::Legal => Box::new(match seed {
                Some(seed) => LegalSamplePolicy::with_seed("legal", seed),
                None => LegalSamplePolicy::new("legal"),
            }),
            PolicyKind::Search => {
                let mut search = config.search;
                if let Some(seed) = seed {
                    search = search.with_seed(seed);
                }
                Box::new(SearchController::new(search)?)
            }
            PolicyKind::QLearning | PolicyKind::Sarsa => {
                let mut q_learning = config.q_learning;
                if config.kind == PolicyKind::Sarsa {
                    q_learning = q_learning.with_update_rule(UpdateRule::Sarsa);
                }
                if let Some(seed) = seed {
                    q_learning = q_learning.with_seed(seed);
                }
                q_learning.validate()?;
                Box::new(QLearningPolicy::new(q_learning))
            }
        };
        Ok(policy)
    }
}

/// Builder for [`App`].
#[derive(Debug, Default)]
pub struct AppBuilder {
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed used when a configuration does not carry one.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn build(self) -> App {
        App {
            default_seed: self.default_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ports::Environment};

    #[test]
    fn test_create_each_policy() {
        let app = App::for_testing().with_default_seed(42).build();
        for kind in PolicyKind::ALL {
            let policy = app.create_policy(PolicyConfig::new(kind)).unwrap();
            assert!(!policy.name().is_empty());
        }
    }

    #[test]
    fn test_sarsa_kind_selects_on_policy_rule() {
        let app = App::new();
        let policy = app.create_policy(PolicyConfig::new(PolicyKind::Sarsa)).unwrap();
        assert_eq!(policy.name(), "SARSA");
        let policy = app.create_policy(PolicyConfig::new(PolicyKind::QLearning)).unwrap();
        assert_eq!(policy.name(), "Q-Learning");
    }

    #[test]
    fn test_invalid_depth_is_rejected() {
        let app = App::new();
        let result = app.create_policy(PolicyConfig::new(PolicyKind::Search).with_depth(0));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_default_seed_reproduces_environment() {
        let app = App::for_testing().with_default_seed(7).build();
        let a = app.create_environment(None);
        let b = app.create_environment(None);
        assert_eq!(a.initial_state(), b.initial_state());
    }
}
