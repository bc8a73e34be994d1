//! Error types for the taxi-driver crate

use thiserror::Error;

/// Main error type for the taxi-driver crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("state {state} is out of range (must be contained between 0 and {states})")]
    StateOutOfRange { state: usize, states: usize },

    #[error("goal already satisfied: the passenger has already been dropped off")]
    GoalAlreadySatisfied,

    #[error("the root node has no ancestor at depth one")]
    RootHasNoAncestor,

    #[error("node '{path}' cannot be rewarded before its parent has been visited")]
    UnvisitedParent { path: String },

    #[error("invalid action letter '{letter}' (expected a letter between 'A' and 'F')")]
    InvalidActionLetter { letter: char },

    #[error("invalid action index {index} (expected 0-5)")]
    InvalidActionIndex { index: usize },

    #[error("invalid action '{name}'. Expected one of: {expected}")]
    InvalidActionName { name: String, expected: String },

    #[error("invalid stage '{name}'. Expected one of: PICK, DROP, DONE")]
    InvalidStage { name: String },

    #[error("unknown node id {id} in a tree of {len} nodes")]
    UnknownNode { id: usize, len: usize },

    #[error("search tree has already been traversed; build a new tree per decision")]
    TreeAlreadyTraversed,

    #[error("search produced no candidate node (max depth {max_depth})")]
    NoCandidate { max_depth: usize },

    #[error("no legal action available in state {state}")]
    NoLegalActions { state: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
