//! Goal-directed, fixed-depth breadth-first tree search
//!
//! One decision goes through four steps:
//!
//! 1. The committed [`Node`] is detached into the root of a fresh
//!    [`SearchTree`], expanded eagerly over the active [`Stage`]'s actions.
//! 2. [`TreeTraversal`] visits the tree breadth-first, replaying each node's
//!    action in the environment after restoring its parent's state. Illegal
//!    actions and revisited states are recorded but not expanded.
//! 3. The [`SearchController`] selects the first node meeting the stage goal,
//!    or else the best-rewarded node at the depth limit.
//! 4. Only the depth-1 step towards that node is committed.
//!
//! ```
//! use taxi_driver::{
//!     ports::{Environment, RunStatus},
//!     search::{SearchConfig, SearchController},
//!     taxi::TaxiEnv,
//! };
//!
//! let mut env = TaxiEnv::new(Some(4));
//! let mut controller = SearchController::for_env(SearchConfig::new(4), &env)?;
//! let mut steps = 0;
//! while steps < 60 {
//!     let decision = controller.next_action(&mut env)?;
//!     steps += 1;
//!     if decision.status == RunStatus::Terminated {
//!         break;
//!     }
//! }
//! # Ok::<(), taxi_driver::Error>(())
//! ```

pub mod controller;
pub mod node;
pub mod stage;
pub mod traversal;
pub mod tree;

pub use controller::{DEFAULT_SEARCH_DEPTH, SearchConfig, SearchController, SearchPlan};
pub use node::Node;
pub use stage::Stage;
pub use traversal::{TreeTraversal, VisitOutcome};
pub use tree::{MAX_SEARCH_DEPTH, SearchTree, full_tree_size};
