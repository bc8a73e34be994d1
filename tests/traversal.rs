//! Breadth-first traversal scenarios with hand-checked expectations

mod common;

use std::collections::HashSet;

use common::{FAR_FROM_PASSENGER, NEXT_TO_PASSENGER, env_at, full_paths, tree_at};
use taxi_driver::{
    Error, NodeId,
    ports::Environment,
    search::{SearchTree, Stage, TreeTraversal},
    taxi::Action,
};

fn child_with_action(tree: &SearchTree, parent: NodeId, action: Action) -> NodeId {
    tree.node(parent)
        .unwrap()
        .children()
        .iter()
        .copied()
        .find(|&id| tree.node(id).unwrap().action() == Some(action))
        .unwrap()
}

#[test]
fn test_unreachable_goal_collects_deepest_frontier() {
    let mut env = env_at(FAR_FROM_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 2);
    let winner = TreeTraversal::new(Stage::Pick).run(&mut tree, &mut env).unwrap();

    assert_eq!(winner, None);
    assert_eq!(tree.winning_node(), None);
    assert_eq!(tree.visited_count(), 14);
    assert_eq!(tree.visited_states().len(), 8);

    let deepest = tree.deepest_frontier().to_vec();
    assert_eq!(
        full_paths(&tree, &deepest),
        ["1A2B", "1A2C", "1B2A", "1B2B", "1B2C", "1B2D", "1C2A", "1C2B", "1C2D"]
    );
    let states: Vec<usize> = deepest
        .iter()
        .map(|&id| tree.node(id).unwrap().state().unwrap())
        .collect();
    assert_eq!(states, [368, 488, 368, 168, 288, 248, 488, 288, 368]);

    let unique: HashSet<NodeId> = deepest.iter().copied().collect();
    assert_eq!(unique.len(), deepest.len());
    for &id in &deepest {
        let node = tree.node(id).unwrap();
        assert_eq!(node.depth(), 2);
        assert_eq!(node.cumulative_reward(), -2.0);
    }
}

#[test]
fn test_first_goal_stops_traversal() {
    let mut env = env_at(NEXT_TO_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 3);
    let winner = TreeTraversal::new(Stage::Pick)
        .run(&mut tree, &mut env)
        .unwrap()
        .unwrap();

    assert_eq!(tree.full_path(winner).unwrap(), "1A2E");
    assert_eq!(
        tree.action_sequence(winner).unwrap(),
        [Action::South, Action::PickUp]
    );
    let node = tree.node(winner).unwrap();
    assert_eq!(node.cumulative_reward(), -2.0);
    assert!(env.item_aboard(node.state().unwrap()));

    // Nothing was visited after the winner
    assert_eq!(tree.visited_count(), 7);
    assert_eq!(tree.visited_states().len(), 4);
    assert_eq!(tree.frontier_len(), 0);
    let visited = tree
        .iter()
        .filter(|(_, node)| !node.is_root() && node.is_visited())
        .count();
    assert_eq!(visited, 7);
    assert!(
        tree.iter()
            .filter(|(_, node)| node.depth() == 3)
            .all(|(_, node)| !node.is_visited())
    );

    let step = tree.ancestor_at_depth_one(winner).unwrap();
    assert_eq!(tree.node(step).unwrap().action(), Some(Action::South));
}

#[test]
fn test_illegal_root_child_is_recorded_but_not_expanded() {
    let mut env = env_at(FAR_FROM_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 2);
    TreeTraversal::new(Stage::Pick).run(&mut tree, &mut env).unwrap();
    let root = tree.root();

    // No passenger at (3, 3): the pick-up is penalized
    let pick_up = child_with_action(&tree, root, Action::PickUp);
    let node = tree.node(pick_up).unwrap();
    assert_eq!(node.state(), Some(FAR_FROM_PASSENGER));
    assert_eq!(node.reward(), -10.0);
    assert_eq!(node.cumulative_reward(), -10.0);
    assert!(!node.children().is_empty());
    for &child in node.children() {
        assert!(!tree.node(child).unwrap().is_visited());
    }

    // A wall blocks the way west: the taxi stays put
    let west = child_with_action(&tree, root, Action::West);
    let node = tree.node(west).unwrap();
    assert_eq!(node.state(), Some(FAR_FROM_PASSENGER));
    assert_eq!(node.reward(), -1.0);
    for &child in node.children() {
        assert!(!tree.node(child).unwrap().is_visited());
    }
}

#[test]
fn test_visited_children_are_restricted_to_legal_actions() {
    let mut env = env_at(FAR_FROM_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 2);
    TreeTraversal::new(Stage::Pick).run(&mut tree, &mut env).unwrap();

    // The root keeps every stage action, legal or not
    assert_eq!(tree.root_node().children().len(), 5);

    for (_, node) in tree.iter() {
        if node.is_root() {
            continue;
        }
        let Some(observation) = node.observation() else {
            continue;
        };
        for &child in node.children() {
            let action = tree.node(child).unwrap().action().unwrap();
            assert!(observation.action_mask.is_legal(action));
        }
    }
}

#[test]
fn test_environment_left_in_searched_state() {
    let mut env = env_at(FAR_FROM_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 2);
    TreeTraversal::new(Stage::Pick).run(&mut tree, &mut env).unwrap();

    // The last visit was 1C2D, which lands back on the root state
    assert_eq!(env.current_state(), FAR_FROM_PASSENGER);
}

#[test]
fn test_traversing_twice_is_rejected() {
    let mut env = env_at(NEXT_TO_PASSENGER);
    let mut tree = tree_at(&env, Stage::Pick, 2);
    let traversal = TreeTraversal::new(Stage::Pick);
    traversal.run(&mut tree, &mut env).unwrap();
    assert!(matches!(
        traversal.run(&mut tree, &mut env),
        Err(Error::TreeAlreadyTraversed)
    ));
}
