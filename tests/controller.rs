//! Search controller driving whole episodes through the stage machine

mod common;

use common::{TWO_ABOVE_PASSENGER, env_at, state};
use taxi_driver::{
    Error,
    ports::{Environment, RunStatus},
    search::{SearchConfig, SearchController, Stage},
    taxi::{Action, Landmark, PassengerLocation},
};

#[test]
fn test_full_episode_delivers_passenger() {
    let mut env = env_at(TWO_ABOVE_PASSENGER);
    let mut controller = SearchController::for_env(SearchConfig::new(5), &env).unwrap();
    assert_eq!(controller.stage(), Stage::Pick);

    let mut actions = Vec::new();
    let mut states = Vec::new();
    let mut stages = Vec::new();
    loop {
        let decision = controller.next_action(&mut env).unwrap();
        actions.push(decision.action);
        states.push(decision.state);
        stages.push(controller.stage());
        if decision.status == RunStatus::Terminated {
            break;
        }
        assert!(actions.len() < 20, "episode did not terminate");
    }

    use Action::*;
    assert_eq!(
        actions,
        [South, South, PickUp, North, North, North, North, DropOff]
    );
    assert_eq!(states, [308, 408, 416, 316, 216, 116, 16, 0]);
    assert_eq!(
        stages,
        [
            Stage::Pick,
            Stage::Pick,
            Stage::Drop,
            Stage::Drop,
            Stage::Drop,
            Stage::Drop,
            Stage::Drop,
            Stage::Done
        ]
    );
    assert_eq!(controller.steps(), 8);
    assert_eq!(controller.cumulative_reward(), 13.0);
    assert_eq!(env.current_state(), 0);

    assert!(matches!(
        controller.next_action(&mut env),
        Err(Error::GoalAlreadySatisfied)
    ));
}

#[test]
fn test_commit_advances_root_to_depth_one_ancestor() {
    let mut env = env_at(TWO_ABOVE_PASSENGER);
    let mut controller = SearchController::for_env(SearchConfig::new(4), &env).unwrap();

    let plan = controller.plan(&mut env).unwrap();
    assert!(plan.won);
    assert_eq!(plan.tree.full_path(plan.selected).unwrap(), "1A2A3E");
    assert_eq!(plan.tree.node(plan.step).unwrap().depth(), 1);
    assert_eq!(plan.tree.root_node().state(), Some(TWO_ABOVE_PASSENGER));

    let decision = controller.commit(&plan, &mut env).unwrap();
    assert_eq!(decision.action, Action::South);
    assert_eq!(decision.reward, -1.0);
    assert_eq!(decision.status, RunStatus::Running);
    assert_eq!(env.current_state(), 308);
    assert_eq!(controller.last_action(), Some(Action::South));

    // The next search is rooted where the committed step landed
    let plan = controller.plan(&mut env).unwrap();
    assert_eq!(plan.tree.root_node().state(), Some(308));
    assert_eq!(plan.tree.root_node().reward(), -1.0);
    assert_eq!(plan.tree.root_node().cumulative_reward(), -1.0);
    assert_eq!(plan.tree.full_path(plan.selected).unwrap(), "1A2E");
    assert_eq!(plan.tree.node(plan.selected).unwrap().cumulative_reward(), -3.0);
    assert_eq!(controller.cumulative_reward(), -1.0);
}

#[test]
fn test_drop_stage_root_carries_committed_rewards() {
    let mut env = env_at(TWO_ABOVE_PASSENGER);
    let mut controller = SearchController::for_env(SearchConfig::new(5), &env).unwrap();
    while controller.stage() == Stage::Pick {
        controller.next_action(&mut env).unwrap();
    }
    assert_eq!(controller.steps(), 3);
    assert_eq!(controller.cumulative_reward(), -3.0);

    let plan = controller.plan(&mut env).unwrap();
    let root = plan.tree.root_node();
    assert_eq!(root.state(), Some(416));
    assert_eq!(root.reward(), -1.0);
    assert_eq!(root.cumulative_reward(), -3.0);

    // North x4 then the drop-off at Red
    assert!(plan.won);
    assert_eq!(plan.tree.full_path(plan.selected).unwrap(), "1B2B3B4B5F");
    assert_eq!(plan.tree.node(plan.selected).unwrap().cumulative_reward(), 13.0);
}

#[test]
fn test_delivered_start_is_already_satisfied() {
    let delivered = state(0, 4, PassengerLocation::At(Landmark::Green), Landmark::Green);
    let mut env = env_at(delivered);
    let mut controller = SearchController::for_env(SearchConfig::default(), &env).unwrap();

    assert_eq!(controller.stage(), Stage::Done);
    assert!(matches!(
        controller.next_action(&mut env),
        Err(Error::GoalAlreadySatisfied)
    ));
    assert_eq!(controller.steps(), 0);
}

#[test]
fn test_invalid_depth_is_rejected() {
    for depth in [0, 10] {
        assert!(matches!(
            SearchController::new(SearchConfig::new(depth)),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}

#[test]
fn test_fallback_is_reproducible_with_seed() {
    // Passenger far out of reach at depth 2, so every step is a fallback pick
    let start = state(0, 4, PassengerLocation::At(Landmark::Yellow), Landmark::Red);
    let run = |seed: u64| {
        let mut env = env_at(start);
        let config = SearchConfig::new(2).with_seed(seed);
        let mut controller = SearchController::for_env(config, &env).unwrap();
        (0..5)
            .map(|_| controller.next_action(&mut env).unwrap().action)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
}

#[test]
fn test_wrong_landmark_drop_returns_to_pick_stage() {
    // Passenger aboard at Yellow, but bound for Red
    let aboard = state(4, 0, PassengerLocation::InTaxi, Landmark::Red);
    let mut env = env_at(aboard);
    assert_eq!(Stage::for_state(&env, aboard), Stage::Drop);

    let transition = env.step(Action::DropOff);
    assert_eq!(transition.reward, -1.0);
    assert!(!env.item_aboard(transition.state));
    assert_eq!(Stage::Drop.next(&env, transition.state), Stage::Pick);
    assert_eq!(Stage::Done.next(&env, transition.state), Stage::Done);
}
