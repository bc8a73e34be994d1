//! Taxi world dynamics as seen through the environment port

mod common;

use common::{FAR_FROM_PASSENGER, TWO_ABOVE_PASSENGER, env_at, state};
use taxi_driver::{
    ports::Environment,
    taxi::{Action, Landmark, PassengerLocation, TaxiState},
};

#[test]
fn test_walls_block_movement() {
    // Wall between (3, 0) and (3, 1)
    let mut env = env_at(state(3, 1, PassengerLocation::At(Landmark::Red), Landmark::Blue));
    let before = env.current_state();
    let transition = env.step(Action::West);
    assert_eq!(transition.state, before);
    assert_eq!(transition.reward, -1.0);
    assert!(!env.observation_of(before).unwrap().action_mask.is_legal(Action::West));

    // Open cell boundary between (2, 0) and (2, 1)
    let mut env = env_at(TWO_ABOVE_PASSENGER);
    let transition = env.step(Action::East);
    assert_eq!(TaxiState::decode(transition.state).unwrap().taxi_position(), (2, 1));
}

#[test]
fn test_delivery_route_rewards() {
    let mut env = env_at(TWO_ABOVE_PASSENGER);
    let route = [
        Action::South,
        Action::South,
        Action::PickUp,
        Action::North,
        Action::North,
        Action::North,
        Action::North,
        Action::DropOff,
    ];

    let mut total = 0.0;
    let mut last = None;
    for action in route {
        let transition = env.step(action);
        total += transition.reward;
        last = Some(transition);
    }
    let last = last.unwrap();

    assert_eq!(total, 13.0);
    assert_eq!(last.reward, 20.0);
    assert!(last.terminated);
    assert!(!last.truncated);
    assert!(env.item_delivered(last.state));
    assert_eq!(env.initial_state(), TWO_ABOVE_PASSENGER);
}

#[test]
fn test_illegal_engagements_are_penalized_in_place() {
    let mut env = env_at(FAR_FROM_PASSENGER);
    for action in [Action::PickUp, Action::DropOff] {
        let transition = env.step(action);
        assert_eq!(transition.reward, -10.0);
        assert_eq!(transition.state, FAR_FROM_PASSENGER);
        assert!(!transition.terminated);
    }
}

#[test]
fn test_action_masks_at_landmarks() {
    let env = env_at(FAR_FROM_PASSENGER);

    let waiting = state(4, 0, PassengerLocation::At(Landmark::Yellow), Landmark::Red);
    let mask = env.observation_of(waiting).unwrap().action_mask;
    assert_eq!(mask.to_bits(), [0, 1, 0, 0, 1, 0]);

    let aboard = state(4, 3, PassengerLocation::InTaxi, Landmark::Red);
    let mask = env.observation_of(aboard).unwrap().action_mask;
    assert!(mask.is_legal(Action::DropOff));
    assert!(!mask.is_legal(Action::PickUp));
}

#[test]
fn test_render_marks_taxi() {
    let env = env_at(FAR_FROM_PASSENGER);
    let rendered = env.render();
    assert!(rendered.contains('T'));
    assert!(rendered.lines().count() >= 7);
}
