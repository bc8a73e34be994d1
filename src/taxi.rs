//! Taxi pickup/drop-off world

pub mod action;
pub mod env;
pub mod grid;

pub use action::{Action, ActionCatalog};
pub use env::TaxiEnv;
pub use grid::{Landmark, PassengerLocation, TaxiState, render_state};
