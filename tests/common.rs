//! Shared fixtures for the taxi-driver integration tests.
#![allow(dead_code)]

use taxi_driver::{
    ports::Environment,
    search::{SearchTree, Stage},
    taxi::{Landmark, PassengerLocation, TaxiEnv, TaxiState},
};

/// Taxi at (3, 3), passenger waiting at Yellow, destination Red.
pub const FAR_FROM_PASSENGER: usize = 368;

/// Taxi at (3, 0), one step north of the passenger waiting at Yellow.
pub const NEXT_TO_PASSENGER: usize = 308;

/// Taxi at (2, 0), passenger at Yellow, destination Red.
pub const TWO_ABOVE_PASSENGER: usize = 208;

/// Encode a state from its parts.
pub fn state(
    row: usize,
    col: usize,
    passenger: PassengerLocation,
    destination: Landmark,
) -> usize {
    TaxiState {
        row,
        col,
        passenger,
        destination,
    }
    .encode()
}

/// Environment pinned to a start state.
pub fn env_at(state: usize) -> TaxiEnv {
    TaxiEnv::from_state(state).expect("state in range")
}

/// Fresh tree rooted at the environment's current state.
pub fn tree_at(env: &TaxiEnv, stage: Stage, depth: usize) -> SearchTree {
    let state = env.current_state();
    let observation = env.observation_of(state).expect("observation");
    SearchTree::for_stage(state, observation, stage, depth).expect("valid tree")
}

/// Full paths of the given nodes, in order.
pub fn full_paths(tree: &SearchTree, ids: &[taxi_driver::NodeId]) -> Vec<String> {
    ids.iter()
        .map(|&id| tree.full_path(id).expect("known node"))
        .collect()
}
