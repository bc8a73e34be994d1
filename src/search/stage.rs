//! Stage state machine of the pickup/drop-off task

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    ports::Environment,
    taxi::{Action, ActionCatalog},
};

/// Sub-goal currently pursued by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Reach the passenger and pick them up
    Pick,
    /// Carry the passenger to the destination and drop them off
    Drop,
    /// Passenger delivered; nothing left to search for
    Done,
}

impl Stage {
    /// Stage that applies to a world state.
    pub fn for_state<E: Environment + ?Sized>(env: &E, state: usize) -> Stage {
        if env.item_delivered(state) {
            Stage::Done
        } else if env.item_aboard(state) {
            Stage::Drop
        } else {
            Stage::Pick
        }
    }

    /// Transition after committing a step that reached `state`.
    ///
    /// | from | item delivered | item aboard | otherwise |
    /// |------|----------------|-------------|-----------|
    /// | Pick | Done           | Drop        | Pick      |
    /// | Drop | Done           | Drop        | Pick      |
    /// | Done | Done           | Done        | Done      |
    pub fn next<E: Environment + ?Sized>(self, env: &E, state: usize) -> Stage {
        match self {
            Stage::Done => Stage::Done,
            Stage::Pick | Stage::Drop => Stage::for_state(env, state),
        }
    }

    /// Ordered action subset searched in this stage.
    pub fn actions(self) -> &'static [Action] {
        match self {
            Stage::Pick => ActionCatalog::pickup_actions(),
            Stage::Drop => ActionCatalog::drop_actions(),
            Stage::Done => &[],
        }
    }

    /// Goal predicate of the stage.
    pub fn goal_met<E: Environment + ?Sized>(self, env: &E, state: usize) -> bool {
        match self {
            Stage::Pick => env.item_aboard(state),
            Stage::Drop | Stage::Done => env.item_delivered(state),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Pick => "PICK",
            Stage::Drop => "DROP",
            Stage::Done => "DONE",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PICK" => Ok(Stage::Pick),
            "DROP" => Ok(Stage::Drop),
            "DONE" => Ok(Stage::Done),
            _ => Err(Error::InvalidStage {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxi::{Landmark, PassengerLocation, TaxiEnv, TaxiState};

    fn encode(passenger: PassengerLocation) -> usize {
        TaxiState {
            row: 2,
            col: 2,
            passenger,
            destination: Landmark::Blue,
        }
        .encode()
    }

    #[test]
    fn test_transition_table() {
        let env = TaxiEnv::from_state(0).unwrap();
        let waiting = encode(PassengerLocation::At(Landmark::Red));
        let aboard = encode(PassengerLocation::InTaxi);
        let delivered = encode(PassengerLocation::At(Landmark::Blue));

        assert_eq!(Stage::Pick.next(&env, waiting), Stage::Pick);
        assert_eq!(Stage::Pick.next(&env, aboard), Stage::Drop);
        assert_eq!(Stage::Pick.next(&env, delivered), Stage::Done);
        assert_eq!(Stage::Drop.next(&env, aboard), Stage::Drop);
        assert_eq!(Stage::Drop.next(&env, delivered), Stage::Done);
        assert_eq!(Stage::Drop.next(&env, waiting), Stage::Pick);
        assert_eq!(Stage::Done.next(&env, waiting), Stage::Done);
    }

    #[test]
    fn test_goal_predicates_per_stage() {
        let env = TaxiEnv::from_state(0).unwrap();
        let aboard = encode(PassengerLocation::InTaxi);
        let delivered = encode(PassengerLocation::At(Landmark::Blue));

        assert!(Stage::Pick.goal_met(&env, aboard));
        assert!(!Stage::Drop.goal_met(&env, aboard));
        assert!(Stage::Drop.goal_met(&env, delivered));
        assert!(!Stage::Pick.goal_met(&env, delivered));
    }

    #[test]
    fn test_stage_actions() {
        assert!(Stage::Pick.actions().contains(&Action::PickUp));
        assert!(Stage::Drop.actions().contains(&Action::DropOff));
        assert!(Stage::Done.actions().is_empty());
    }

    #[test]
    fn test_stage_names_round_trip() {
        for stage in [Stage::Pick, Stage::Drop, Stage::Done] {
            assert_eq!(stage.name().parse::<Stage>().unwrap(), stage);
        }
        assert_eq!("pick".parse::<Stage>().unwrap(), Stage::Pick);
        assert!(matches!(
            "FLY".parse::<Stage>(),
            Err(Error::InvalidStage { .. })
        ));
    }
}
