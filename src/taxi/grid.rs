//! Grid layout, state encoding and transition rules of the taxi world

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Action;
use crate::{
    error::{Error, Result},
    types::{ActionMask, STATE_COUNT},
};

/// ASCII map of the world. `:` separates passable cells, `|` is a wall.
pub const MAP: [&str; 7] = [
    "+---------+",
    "|R: | : :G|",
    "| : | : : |",
    "| : : : : |",
    "| | : | : |",
    "|Y| : |B: |",
    "+---------+",
];

pub const GRID_ROWS: usize = 5;
pub const GRID_COLS: usize = 5;

/// Reward of every ordinary step.
pub const STEP_REWARD: f64 = -1.0;
/// Reward for delivering the passenger at the destination.
pub const DELIVERY_REWARD: f64 = 20.0;
/// Reward for a pick-up or drop-off attempted where it is not allowed.
pub const ILLEGAL_ENGAGEMENT_REWARD: f64 = -10.0;

/// One of the four colored pickup/drop-off spots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Landmark {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Landmark {
    pub const ALL: [Landmark; 4] = [
        Landmark::Red,
        Landmark::Green,
        Landmark::Yellow,
        Landmark::Blue,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid coordinates as `(row, col)`.
    pub fn position(self) -> (usize, usize) {
        match self {
            Landmark::Red => (0, 0),
            Landmark::Green => (0, 4),
            Landmark::Yellow => (4, 0),
            Landmark::Blue => (4, 3),
        }
    }

    /// Landmark located at a grid cell, if any.
    pub fn at(row: usize, col: usize) -> Option<Landmark> {
        Landmark::ALL
            .into_iter()
            .find(|landmark| landmark.position() == (row, col))
    }

    fn from_index(index: usize) -> Option<Landmark> {
        Landmark::ALL.get(index).copied()
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Landmark::Red => "RED",
            Landmark::Green => "GREEN",
            Landmark::Yellow => "YELLOW",
            Landmark::Blue => "BLUE",
        };
        f.write_str(name)
    }
}

/// Where the passenger currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassengerLocation {
    At(Landmark),
    InTaxi,
}

impl PassengerLocation {
    fn index(self) -> usize {
        match self {
            PassengerLocation::At(landmark) => landmark.index(),
            PassengerLocation::InTaxi => 4,
        }
    }
}

impl fmt::Display for PassengerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassengerLocation::At(landmark) => write!(f, "{landmark}"),
            PassengerLocation::InTaxi => f.write_str("TAXI"),
        }
    }
}

/// Decoded world state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxiState {
    pub row: usize,
    pub col: usize,
    pub passenger: PassengerLocation,
    pub destination: Landmark,
}

impl TaxiState {
    /// Decode a state index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateOutOfRange`] if `state >= 500`.
    ///
    /// # Examples
    ///
    /// ```
    /// use taxi_driver::taxi::{Landmark, PassengerLocation, TaxiState};
    ///
    /// let state = TaxiState::decode(468).unwrap();
    /// assert_eq!((state.row, state.col), (4, 3));
    /// assert_eq!(state.passenger, PassengerLocation::At(Landmark::Yellow));
    /// assert_eq!(state.destination, Landmark::Red);
    /// assert_eq!(state.encode(), 468);
    /// ```
    pub fn decode(state: usize) -> Result<Self> {
        if state >= STATE_COUNT {
            return Err(Error::StateOutOfRange {
                state,
                states: STATE_COUNT,
            });
        }
        let destination = state % 4;
        let passenger = (state / 4) % 5;
        let col = (state / 20) % 5;
        let row = state / 100;

        let passenger = match Landmark::from_index(passenger) {
            Some(landmark) => PassengerLocation::At(landmark),
            None => PassengerLocation::InTaxi,
        };
        let destination =
            Landmark::from_index(destination).ok_or(Error::StateOutOfRange {
                state,
                states: STATE_COUNT,
            })?;

        Ok(Self {
            row,
            col,
            passenger,
            destination,
        })
    }

    /// Encode back into a state index.
    pub fn encode(&self) -> usize {
        ((self.row * GRID_COLS + self.col) * 5 + self.passenger.index()) * 4
            + self.destination.index()
    }

    pub fn taxi_position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn passenger_in_taxi(&self) -> bool {
        self.passenger == PassengerLocation::InTaxi
    }

    pub fn passenger_delivered(&self) -> bool {
        self.passenger == PassengerLocation::At(self.destination)
    }

    /// Legality of each catalog action from this state.
    pub fn action_mask(&self) -> ActionMask {
        let here = Landmark::at(self.row, self.col);
        let can_pick = match self.passenger {
            PassengerLocation::At(landmark) => here == Some(landmark),
            PassengerLocation::InTaxi => false,
        };
        let can_drop = self.passenger_in_taxi() && here.is_some();

        ActionMask::new([
            self.row < GRID_ROWS - 1,
            self.row > 0,
            self.col < GRID_COLS - 1 && open_towards_east(self.row, self.col),
            self.col > 0 && open_towards_west(self.row, self.col),
            can_pick,
            can_drop,
        ])
    }

    /// Apply an action, returning the next state, the reward and whether the
    /// passenger was just delivered.
    pub fn apply(&self, action: Action) -> (TaxiState, f64, bool) {
        let mut next = *self;
        let mut reward = STEP_REWARD;
        let mut delivered = false;

        match action {
            Action::South => next.row = (self.row + 1).min(GRID_ROWS - 1),
            Action::North => next.row = self.row.saturating_sub(1),
            Action::East => {
                if open_towards_east(self.row, self.col) {
                    next.col = (self.col + 1).min(GRID_COLS - 1);
                }
            }
            Action::West => {
                if open_towards_west(self.row, self.col) {
                    next.col = self.col.saturating_sub(1);
                }
            }
            Action::PickUp => match self.passenger {
                PassengerLocation::At(landmark) if landmark.position() == self.taxi_position() => {
                    next.passenger = PassengerLocation::InTaxi;
                }
                _ => reward = ILLEGAL_ENGAGEMENT_REWARD,
            },
            Action::DropOff => {
                let here = Landmark::at(self.row, self.col);
                match (self.passenger, here) {
                    (PassengerLocation::InTaxi, Some(landmark)) if landmark == self.destination => {
                        next.passenger = PassengerLocation::At(landmark);
                        reward = DELIVERY_REWARD;
                        delivered = true;
                    }
                    (PassengerLocation::InTaxi, Some(landmark)) => {
                        next.passenger = PassengerLocation::At(landmark);
                    }
                    _ => reward = ILLEGAL_ENGAGEMENT_REWARD,
                }
            }
        }

        (next, reward, delivered)
    }
}

impl fmt::Display for TaxiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "taxi=({}, {}) passenger={} destination={}",
            self.row, self.col, self.passenger, self.destination
        )
    }
}

fn open_towards_east(row: usize, col: usize) -> bool {
    MAP[row + 1].as_bytes().get(2 * col + 2) == Some(&b':')
}

fn open_towards_west(row: usize, col: usize) -> bool {
    MAP[row + 1].as_bytes().get(2 * col) == Some(&b':')
}

/// Render a state onto the ASCII map.
///
/// The taxi is drawn as `T` when empty and `@` when carrying the passenger.
pub fn render_state(state: &TaxiState) -> String {
    let mut lines: Vec<Vec<char>> = MAP.iter().map(|line| line.chars().collect()).collect();
    let marker = if state.passenger_in_taxi() { '@' } else { 'T' };
    lines[state.row + 1][2 * state.col + 1] = marker;

    let mut out: String = lines
        .into_iter()
        .map(|line| line.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&format!(
        "\nPassenger: {}  Destination: {}",
        state.passenger, state.destination
    ));
    out
}
